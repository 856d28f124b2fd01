use crate::model::BlockList;
use std::sync::Arc;

/// Supplies the current blocklist. `None` means no rules are configured.
pub trait RuleProvider {
    fn block_list(&self) -> Option<Arc<BlockList>>;
}

/// A provider with a fixed blocklist (or none).
#[derive(Clone, Debug, Default)]
pub struct StaticRuleProvider {
    block_list: Option<Arc<BlockList>>,
}

impl StaticRuleProvider {
    pub fn new(block_list: BlockList) -> Self {
        Self {
            block_list: Some(Arc::new(block_list)),
        }
    }

    pub fn empty() -> Self {
        Self { block_list: None }
    }
}

impl From<Option<BlockList>> for StaticRuleProvider {
    fn from(value: Option<BlockList>) -> Self {
        Self {
            block_list: value.map(Arc::new),
        }
    }
}

impl RuleProvider for StaticRuleProvider {
    fn block_list(&self) -> Option<Arc<BlockList>> {
        self.block_list.clone()
    }
}

impl<F> RuleProvider for F
where
    F: Fn() -> Option<Arc<BlockList>>,
{
    fn block_list(&self) -> Option<Arc<BlockList>> {
        self()
    }
}
