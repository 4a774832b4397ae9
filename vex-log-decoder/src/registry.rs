//! Device and action registries
//!
//! Fixed lookup tables for the device letter and the action code of a
//! record. Both are built once when a [`Registry`] is created and are never
//! mutated afterwards.

use std::collections::HashMap;

/// Device name used when the device letter is not registered
pub const DEVICE_NAME_UNKNOWN: &str = "UNKNOWN";

/// Device letter -> device name
pub const DEVICES: &[(char, &str)] = &[
    ('C', "Controller"),
    ('D', "Drivetrain"),
    ('G', "Motor Group"),
    ('M', "Motor"),
    ('B', "Bumper"),
    ('X', "Distance"),
    ('T', "TouchLED"),
    ('Y', "Color"),
    ('V', "Vision"),
    ('A', "AI Vision"),
    ('O', "Optical"),
    ('Z', "Gyro"),
    ('P', "Pneumatic"),
];

/// Action code -> action description
pub const ACTIONS: &[(&str, &str)] = &[
    ("PON", "Pump On"),
    ("POF", "Pump Off"),
    ("EX1", "Cylinder 1 Extend"),
    ("RT1", "Cylinder 1 Retract"),
    ("EX2", "Cylinder 2 Extend"),
    ("RT2", "Cylinder 2 Retract"),
    ("EUP", "EUp Pressed"),
    ("EDW", "EDown Pressed"),
    ("FUP", "FUp Pressed"),
    ("FDW", "FDown Pressed"),
    ("LUP", "Left Up Pressed"),
    ("LDW", "Left Down Pressed"),
    ("RUP", "Right Up Pressed"),
    ("RDW", "Right Down Pressed"),
    ("FRD", "Forward"),
    ("RRS", "Reverse"),
    ("STP", "Stop"),
    ("PRS", "Pressed"),
    ("TCH", "TouchLED Pressed"),
];

/// Read-only view over both lookup tables
#[derive(Debug, Clone)]
pub struct Registry {
    devices: HashMap<char, &'static str>,
    actions: HashMap<&'static str, &'static str>,
}

/// Number of entries in each table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStats {
    pub num_devices: usize,
    pub num_actions: usize,
}

impl Registry {
    /// Build the registry from the fixed tables
    pub fn new() -> Self {
        Self {
            devices: DEVICES.iter().copied().collect(),
            actions: ACTIONS.iter().copied().collect(),
        }
    }

    /// Look up a device letter. Case-sensitive.
    pub fn device_name(&self, code: char) -> Option<&'static str> {
        self.devices.get(&code).copied()
    }

    /// Look up an action code verbatim (no trimming, case-sensitive)
    pub fn action_description(&self, code: &str) -> Option<&'static str> {
        self.actions.get(code).copied()
    }

    /// Device name, or [`DEVICE_NAME_UNKNOWN`] on a miss
    pub fn device_name_or_unknown(&self, code: char) -> &'static str {
        self.device_name(code).unwrap_or(DEVICE_NAME_UNKNOWN)
    }

    /// Action description, or the code itself on a miss
    pub fn action_description_or_code<'a>(&self, code: &'a str) -> &'a str {
        match self.action_description(code) {
            Some(description) => description,
            None => code,
        }
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            num_devices: self.devices.len(),
            num_actions: self.actions.len(),
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
