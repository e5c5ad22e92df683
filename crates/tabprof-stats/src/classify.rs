//! Column classification.

use serde::Serialize;

use tabprof_model::{Column, SemanticType};

/// Semantic type of a column and whether distribution statistics apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub semantic_type: SemanticType,
    pub distribution_supported: bool,
}

/// Classifies `column` to route statistic computation.
///
/// Frequency tables are available for every class; distribution statistics
/// only for the eight numeric, temporal and range-like classes.
pub fn classify(column: &Column) -> Classification {
    let semantic_type = column.dtype();
    Classification {
        semantic_type,
        distribution_supported: semantic_type.supports_distribution(),
    }
}
