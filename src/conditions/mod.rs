//! Condition gating for support-card effects.

mod condition;

pub use condition::{
    Condition, ConditionContext, ConditionEvaluator, ConditionKind, ConditionReport, PassiveStatus,
};
