//! Typed error vocabulary shared by validation, option generation, and the
//! solver adapter. Every `{code, message}` pair returned to a caller is built
//! from one of these variants.

use crate::domain::{Diagnostics, ErrorDetail, SectionId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationErrorKind {
    #[error("Cross-list group {group_id} requires capacity {required}, but max room is {max_capacity}.")]
    CrosslistCapacity {
        group_id: String,
        required: u32,
        max_capacity: u32,
    },

    #[error("Section {section_id} has no feasible assignment options.")]
    NoFeasibleOptions { section_id: SectionId },

    #[error("No feasible schedule found.")]
    Infeasible { diagnostics: Diagnostics },
}

impl ValidationErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationErrorKind::CrosslistCapacity { .. } => "crosslist_capacity",
            ValidationErrorKind::NoFeasibleOptions { .. } => "no_feasible_options",
            ValidationErrorKind::Infeasible { .. } => "infeasible",
        }
    }

    pub fn to_detail(&self) -> ErrorDetail {
        ErrorDetail {
            code: self.code().to_string(),
            message: self.to_string(),
        }
    }

    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            ValidationErrorKind::Infeasible { diagnostics } => Some(diagnostics),
            _ => None,
        }
    }
}
