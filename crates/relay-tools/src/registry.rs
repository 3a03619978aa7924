use crate::error::{Result, ToolError};
use crate::traits::Tool;
use relay_core::ToolDefinition;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Name-to-tool table, fixed at construction. Queries return tools in
/// registration order.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Builds a registry, failing on the first duplicate name.
    pub fn register(tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Result<Self> {
        let mut registry = Self::empty();
        for tool in tools {
            let name = tool.name().to_string();
            if registry.index.contains_key(&name) {
                return Err(ToolError::AlreadyRegistered(name));
            }
            registry.index.insert(name, registry.tools.len());
            registry.tools.push(tool);
        }
        debug!(tools = ?registry.list(), "Built tool registry");
        Ok(registry)
    }

    pub fn empty() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn list(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn dangerous_tools(&self) -> Vec<&str> {
        self.tools
            .iter()
            .filter(|t| t.is_dangerous())
            .map(|t| t.name())
            .collect()
    }

    pub fn safe_tools(&self) -> Vec<&str> {
        self.tools
            .iter()
            .filter(|t| !t.is_dangerous())
            .map(|t| t.name())
            .collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ToolOutput;
    use async_trait::async_trait;
    use relay_core::Context;
    use serde_json::Value;

    struct MockTool {
        def: ToolDefinition,
    }

    impl MockTool {
        fn arc(name: &str, dangerous: bool) -> Arc<dyn Tool> {
            let mut def = ToolDefinition::new(name, format!("{} tool", name));
            if dangerous {
                def = def.dangerous();
            }
            Arc::new(Self { def })
        }
    }

    #[async_trait]
    impl Tool for MockTool {
        fn definition(&self) -> &ToolDefinition {
            &self.def
        }

        async fn execute(&self, _ctx: &Context, _input: Value) -> crate::error::Result<ToolOutput> {
            Ok(ToolOutput::text("mock output"))
        }
    }

    #[test]
    fn test_registry_register() {
        let registry = ToolRegistry::register([MockTool::arc("test_tool", false)]).unwrap();

        assert!(registry.contains("test_tool"));
        assert!(registry.get("test_tool").is_some());
        assert!(registry.get("other").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_duplicate() {
        let result = ToolRegistry::register([MockTool::arc("dup", false), MockTool::arc("dup", true)]);
        assert!(matches!(result, Err(ToolError::AlreadyRegistered(name)) if name == "dup"));
    }

    #[test]
    fn test_registry_preserves_order() {
        let registry = ToolRegistry::register([
            MockTool::arc("zeta", false),
            MockTool::arc("alpha", true),
            MockTool::arc("mid", false),
        ])
        .unwrap();

        assert_eq!(registry.list(), vec!["zeta", "alpha", "mid"]);
        let names: Vec<_> = registry.definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_registry_dangerous_tools() {
        let registry =
            ToolRegistry::register([MockTool::arc("safe", false), MockTool::arc("danger", true)])
                .unwrap();

        assert_eq!(registry.dangerous_tools(), vec!["danger"]);
        assert_eq!(registry.safe_tools(), vec!["safe"]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = ToolRegistry::register(Vec::new()).unwrap();
        assert!(registry.is_empty());
        assert!(registry.definitions().is_empty());
    }
}
