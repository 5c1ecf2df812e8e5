/// One package-id/version pair, as reported by the tool listing or recorded
/// in the manifest file. Both fields are opaque text; versions are never
/// interpreted, only carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRecord {
    pub package_id: String,
    pub version: String,
}

impl ToolRecord {
    pub fn new(package_id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            package_id: package_id.into(),
            version: version.into(),
        }
    }
}
