//! CLI modes.

use std::fmt;

/// A CLI context restricting which commands are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CliMode {
    UserExec,
    PrivilegedExec,
    GlobalConfig,
    LineConfig,
    InterfaceConfig,
    OspfConfig,
}

impl CliMode {
    /// Number of modes.
    pub const COUNT: usize = 6;

    /// Every mode, in nesting order.
    pub const ALL: [CliMode; Self::COUNT] = [
        CliMode::UserExec,
        CliMode::PrivilegedExec,
        CliMode::GlobalConfig,
        CliMode::LineConfig,
        CliMode::InterfaceConfig,
        CliMode::OspfConfig,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            CliMode::UserExec => 0,
            CliMode::PrivilegedExec => 1,
            CliMode::GlobalConfig => 2,
            CliMode::LineConfig => 3,
            CliMode::InterfaceConfig => 4,
            CliMode::OspfConfig => 5,
        }
    }

    /// Text appended to the hostname to form the prompt.
    pub fn prompt_suffix(self) -> &'static str {
        match self {
            CliMode::UserExec => ">",
            CliMode::PrivilegedExec => "#",
            CliMode::GlobalConfig => "(config)#",
            CliMode::LineConfig => "(config-line)#",
            CliMode::InterfaceConfig => "(config-if)#",
            CliMode::OspfConfig => "(config-router)#",
        }
    }

    /// Whether this is global config or one of its submodes.
    pub fn is_config(self) -> bool {
        !matches!(self, CliMode::UserExec | CliMode::PrivilegedExec)
    }
}

impl fmt::Display for CliMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CliMode::UserExec => "user-exec",
            CliMode::PrivilegedExec => "privileged-exec",
            CliMode::GlobalConfig => "global-config",
            CliMode::LineConfig => "line-config",
            CliMode::InterfaceConfig => "interface-config",
            CliMode::OspfConfig => "ospf-config",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_distinct_and_dense() {
        let mut seen: Vec<usize> = CliMode::ALL.iter().map(|m| m.index()).collect();
        seen.sort();
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn config_modes() {
        assert!(!CliMode::UserExec.is_config());
        assert!(!CliMode::PrivilegedExec.is_config());
        assert!(CliMode::GlobalConfig.is_config());
        assert!(CliMode::OspfConfig.is_config());
    }

    #[test]
    fn display_labels() {
        assert_eq!(CliMode::InterfaceConfig.to_string(), "interface-config");
    }
}
