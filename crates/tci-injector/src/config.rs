//! Injector configuration
//!
//! Compiled-in defaults with builder-style overrides; there is no
//! configuration file.

use std::path::PathBuf;
use tci_rewrite::{
    default_rules, AccessorImportRule, InjectionProfile, RuleRegistry, UpdatePreservationRule,
};

/// Service modules rewritten by default, relative to [`DEFAULT_BASE_DIR`]
pub const DEFAULT_SERVICE_FILES: &[&str] = &[
    "areasService.ts",
    "campersService.ts",
    "certificationsService.ts",
    "colorsService.ts",
    "durationPresetsService.ts",
    "eventsService.ts",
    "groupsService.ts",
    "housingRoomsService.ts",
    "locationsService.ts",
    "programsService.ts",
    "rolesService.ts",
    "sessionsService.ts",
    "staffMembersService.ts",
];

/// Directory holding the service modules, relative to the working directory
pub const DEFAULT_BASE_DIR: &str = "src/services";

/// Largest file the processor will parse (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Injector configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectorConfig {
    /// Directory the file list is resolved against
    pub base_dir: PathBuf,
    /// File names processed in order
    pub files: Vec<String>,
    /// Maximum accepted file size in bytes
    pub max_file_size: u64,
    /// Names and shapes the rules look for
    pub profile: InjectionProfile,
    /// Run the update-preservation rule
    pub update_preservation: bool,
    /// Run the accessor-import rule
    pub accessor_import: bool,
}

impl Default for InjectorConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            files: DEFAULT_SERVICE_FILES.iter().map(|f| (*f).to_string()).collect(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            profile: InjectionProfile::default(),
            update_preservation: false,
            accessor_import: false,
        }
    }
}

impl InjectorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base directory
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    /// Set file list
    #[must_use]
    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Set maximum file size
    #[must_use]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Set injection profile
    #[must_use]
    pub fn with_profile(mut self, profile: InjectionProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Toggle the update-preservation rule
    #[must_use]
    pub fn with_update_preservation(mut self, enabled: bool) -> Self {
        self.update_preservation = enabled;
        self
    }

    /// Toggle the accessor-import rule
    #[must_use]
    pub fn with_accessor_import(mut self, enabled: bool) -> Self {
        self.accessor_import = enabled;
        self
    }

    /// Resolved paths of the configured files, in order
    #[must_use]
    pub fn targets(&self) -> Vec<PathBuf> {
        self.files.iter().map(|f| self.base_dir.join(f)).collect()
    }

    /// Rule registry reflecting the profile and toggles
    #[must_use]
    pub fn registry(&self) -> RuleRegistry {
        let mut registry = default_rules(&self.profile);
        registry.set_enabled(UpdatePreservationRule::NAME, self.update_preservation);
        registry.set_enabled(AccessorImportRule::NAME, self.accessor_import);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tci_rewrite::EntityCreationRule;

    #[test]
    fn default_targets() {
        let config = InjectorConfig::default();
        let targets = config.targets();

        assert_eq!(targets.len(), 13);
        assert_eq!(targets[0], PathBuf::from("src/services/areasService.ts"));
        assert_eq!(targets[12], PathBuf::from("src/services/staffMembersService.ts"));
        assert_eq!(config.max_file_size, 10 * 1024 * 1024);
    }

    #[test]
    fn default_registry_runs_creation_only() {
        let registry = InjectorConfig::new().registry();
        assert_eq!(registry.active_names(), vec![EntityCreationRule::NAME]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn toggles_reach_registry() {
        let registry = InjectorConfig::new()
            .with_update_preservation(true)
            .with_accessor_import(true)
            .registry();

        assert_eq!(
            registry.active_names(),
            vec![
                EntityCreationRule::NAME,
                UpdatePreservationRule::NAME,
                AccessorImportRule::NAME
            ]
        );
    }

    #[test]
    fn builder_overrides() {
        let config = InjectorConfig::new()
            .with_base_dir("/tmp/project/src/services")
            .with_files(["a.ts", "b.tsx"])
            .with_max_file_size(64);

        assert_eq!(
            config.targets(),
            vec![
                PathBuf::from("/tmp/project/src/services/a.ts"),
                PathBuf::from("/tmp/project/src/services/b.tsx")
            ]
        );
        assert_eq!(config.max_file_size, 64);
    }
}
