use serde::{Deserialize, Serialize};

use crate::memorydb::{SlotNode, SlotRange};

/// Response type for successful GET operations
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

/// A node serving a slot range
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
pub struct ClusterNodeResponse {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Addr")]
    pub addr: String,
}

/// One entry of the cluster topology returned by `GET /`
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ClusterSlotResponse {
    pub start: u16,
    pub end: u16,
    pub nodes: Vec<ClusterNodeResponse>,
}

impl From<SlotNode> for ClusterNodeResponse {
    fn from(node: SlotNode) -> Self {
        Self {
            id: node.id,
            addr: node.addr,
        }
    }
}

impl From<SlotRange> for ClusterSlotResponse {
    fn from(range: SlotRange) -> Self {
        Self {
            start: range.start,
            end: range.end,
            nodes: range.nodes.into_iter().map(Into::into).collect(),
        }
    }
}
