/// Hot list section of the aggregator page.
///
/// Each section is a container element whose `id` is the node identifier;
/// the display name is what gets stored as the record's `source`.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub node_id: &'static str,
    pub name: &'static str,
}

impl SourceConfig {
    pub fn new(node_id: &'static str, name: &'static str) -> Self {
        Self { node_id, name }
    }
}

/// Get the list of hot list sections to parse from a snapshot
pub fn get_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig::new("node-32", "虎嗅网"),
        SourceConfig::new("node-1", "微博"),
        SourceConfig::new("node-6", "知乎"),
        SourceConfig::new("node-5", "微信"),
        SourceConfig::new("node-19", "哔哩哔哩"),
        SourceConfig::new("node-221", "抖音"),
    ]
}
