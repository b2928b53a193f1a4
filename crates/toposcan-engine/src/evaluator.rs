//! Configuration to category: graph, composition, classification.

use std::sync::Arc;

use toposcan_config::PipelineConfig;
use toposcan_core::{
    Category, Configuration, IntersectionForm, RuleTable, SpectralClassifier, TopoError,
};
use tracing::trace;

use crate::error::Result;

/// Outcome of evaluating one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub category: Category,
    pub form: IntersectionForm,
}

/// Builds and classifies configurations against one rule table.
#[derive(Debug, Clone)]
pub struct Evaluator {
    rules: Arc<RuleTable>,
    classifier: SpectralClassifier,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(RuleTable::builtin(), SpectralClassifier::default())
    }
}

impl Evaluator {
    pub fn new(rules: Arc<RuleTable>, classifier: SpectralClassifier) -> Self {
        Self { rules, classifier }
    }

    /// Uses the configured rule table and classifier.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        Ok(Self::new(config.rule_table()?, config.classifier()))
    }

    pub fn rules(&self) -> &Arc<RuleTable> {
        &self.rules
    }

    pub fn classifier(&self) -> &SpectralClassifier {
        &self.classifier
    }

    /// Glues `config`, composes its form and classifies it.
    ///
    /// # Errors
    ///
    /// Any rejected gluing or unsupported block tag.
    pub fn evaluate(&self, config: &Configuration) -> std::result::Result<Evaluation, TopoError> {
        let graph = config.to_graph(Arc::clone(&self.rules))?;
        let form = graph.compose();
        let category = self.classifier.classify(&form);
        trace!(
            event = "classified",
            configuration = %config,
            dim = form.nrows(),
            category = %category,
        );
        Ok(Evaluation { category, form })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toposcan_core::ChainKind;

    #[test]
    fn test_single_node_is_scft() {
        let eval = Evaluator::default()
            .evaluate(&Configuration::single(ChainKind::Node, 3))
            .unwrap();
        assert_eq!(eval.category, Category::Scft);
        assert_eq!(eval.form.shape(), (1, 1));
        assert_eq!(eval.form[(0, 0)], -3);
    }

    #[test]
    fn test_two_nodes_are_lst() {
        let mut config = Configuration::single(ChainKind::Node, 1);
        config.add_block_right(ChainKind::Node, 1);
        let eval = Evaluator::default().evaluate(&config).unwrap();
        assert_eq!(eval.category, Category::Lst);
    }

    #[test]
    fn test_banned_gluing_is_an_error() {
        let mut config = Configuration::single(ChainKind::Side, 11);
        config.add_block_right(ChainKind::Node, 9);
        assert!(matches!(
            Evaluator::default().evaluate(&config),
            Err(TopoError::BannedPair { .. })
        ));
    }

    #[test]
    fn test_empty_configuration_is_unclassified() {
        let eval = Evaluator::default().evaluate(&Configuration::new()).unwrap();
        assert_eq!(eval.category, Category::Unclassified);
    }
}
