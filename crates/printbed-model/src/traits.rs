// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collaborator traits

use crate::{MachineConfiguration, Result};

/// Supplier of machine configuration snapshots
///
/// Implemented by the settings store of the host application. The build
/// volume asks for one snapshot per rebuild and never holds on to the
/// source, so implementations are free to resolve values lazily.
///
/// # Example
///
/// ```ignore
/// use printbed_model::{MachineConfiguration, SettingsSource};
///
/// struct Store { /* container stacks */ }
///
/// impl SettingsSource for Store {
///     fn snapshot(&self) -> printbed_model::Result<MachineConfiguration> {
///         // resolve every build volume setting into a value
///         todo!()
///     }
/// }
/// ```
pub trait SettingsSource {
    /// Resolve the current configuration into an owned snapshot
    fn snapshot(&self) -> Result<MachineConfiguration>;
}

impl SettingsSource for MachineConfiguration {
    fn snapshot(&self) -> Result<MachineConfiguration> {
        Ok(self.clone())
    }
}
