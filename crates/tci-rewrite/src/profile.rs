//! Injection profile: the names and shapes the rules look for

/// Declared-name suffixes that mark a domain entity
pub const DEFAULT_ENTITY_SUFFIXES: &[&str] = &[
    "Entity",
    "Activity",
    "Area",
    "Camper",
    "Certification",
    "Color",
    "DurationPreset",
    "Event",
    "Group",
    "HousingRoom",
    "Location",
    "Program",
    "Role",
    "Session",
    "StaffMember",
];

/// Conventional names of the "existing instance" variable in update functions
pub const DEFAULT_EXISTING_BINDINGS: &[&str] = &["existing", "existingEntity", "current", "entity"];

/// How a declared name qualified as an entity construction target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetKind {
    /// Name ends in a known entity suffix
    Entity(String),
    /// Name matched no suffix but any assignment target is accepted
    Unconstrained,
}

/// Policy deciding which declared names may construct an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetNames {
    suffixes: Vec<String>,
    allow_any: bool,
}

impl TargetNames {
    /// Accept only names ending in one of `suffixes`
    #[must_use]
    pub fn suffixes<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
            allow_any: false,
        }
    }

    /// Also accept names that match no suffix
    #[inline]
    #[must_use]
    pub fn allow_any(mut self, allow: bool) -> Self {
        self.allow_any = allow;
        self
    }

    /// Known entity suffixes
    #[inline]
    #[must_use]
    pub fn known_suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// Classify a declared name, `None` if it is not a target
    #[must_use]
    pub fn classify(&self, name: &str) -> Option<TargetKind> {
        if let Some(suffix) = self.suffixes.iter().find(|s| name.ends_with(s.as_str())) {
            return Some(TargetKind::Entity(suffix.clone()));
        }
        self.allow_any.then_some(TargetKind::Unconstrained)
    }
}

impl Default for TargetNames {
    fn default() -> Self {
        Self::suffixes(DEFAULT_ENTITY_SUFFIXES.iter().copied()).allow_any(true)
    }
}

/// Names and shapes shared by every rule
///
/// The defaults describe the service layer this tool was written for:
/// entities carry a `meta` block whose `id` comes from `crypto.randomUUID()`,
/// and `getTenantContext()` from `@/utils/tenantContext` supplies the
/// tenant and camp identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionProfile {
    /// Tenant identifier field
    pub tenant_field: String,
    /// Camp identifier field
    pub camp_field: String,
    /// Ambient accessor returning both identifiers
    pub accessor: String,
    /// Module the accessor is imported from
    pub accessor_module: String,
    /// Key of the metadata block inside an entity literal
    pub meta_key: String,
    /// Identifier field inside the metadata block
    pub id_field: String,
    /// Call paths that generate a fresh identifier
    pub id_generators: Vec<String>,
    /// Which declared names construct entities
    pub targets: TargetNames,
    /// Variables holding the pre-update instance, tried in order
    pub existing_bindings: Vec<String>,
    /// Indentation used when none can be inferred
    pub default_indent: String,
}

impl InjectionProfile {
    /// Create default profile
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With target-name policy
    #[inline]
    #[must_use]
    pub fn with_targets(mut self, targets: TargetNames) -> Self {
        self.targets = targets;
        self
    }

    /// With accessor function and its module
    #[inline]
    #[must_use]
    pub fn with_accessor(mut self, accessor: impl Into<String>, module: impl Into<String>) -> Self {
        self.accessor = accessor.into();
        self.accessor_module = module.into();
        self
    }

    /// With identifier generator call paths
    #[must_use]
    pub fn with_id_generators<I, S>(mut self, generators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.id_generators = generators.into_iter().map(Into::into).collect();
        self
    }

    /// With existing-instance variable names
    #[must_use]
    pub fn with_existing_bindings<I, S>(mut self, bindings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.existing_bindings = bindings.into_iter().map(Into::into).collect();
        self
    }

    /// Both tenant-scope field names
    #[inline]
    #[must_use]
    pub fn tenant_fields(&self) -> [&str; 2] {
        [&self.tenant_field, &self.camp_field]
    }

    /// Statement that pulls both identifiers from the accessor
    #[must_use]
    pub fn declaration(&self) -> String {
        format!(
            "const {{ {}, {} }} = {}();",
            self.tenant_field, self.camp_field, self.accessor
        )
    }

    /// Import statement for the accessor
    #[must_use]
    pub fn import_statement(&self) -> String {
        format!(
            "import {{ {} }} from \"{}\";",
            self.accessor, self.accessor_module
        )
    }

    /// `<binding>.<meta>.<field>` path
    #[must_use]
    pub fn meta_path(&self, binding: &str, field: &str) -> String {
        format!("{binding}.{}.{field}", self.meta_key)
    }
}

impl Default for InjectionProfile {
    fn default() -> Self {
        Self {
            tenant_field: "tenantId".to_string(),
            camp_field: "campId".to_string(),
            accessor: "getTenantContext".to_string(),
            accessor_module: "@/utils/tenantContext".to_string(),
            meta_key: "meta".to_string(),
            id_field: "id".to_string(),
            id_generators: vec!["crypto.randomUUID".to_string()],
            targets: TargetNames::default(),
            existing_bindings: DEFAULT_EXISTING_BINDINGS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            default_indent: "  ".to_string(),
        }
    }
}
