use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The declared type of a resource attribute or function result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Integer,
    Float,
    Boolean,
    Date,
    Object,
    Reference,
}
