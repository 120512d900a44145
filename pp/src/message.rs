//! Message value passed between pipeline stages

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Addressing fields plus free-form header items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Header {
    #[serde(rename = "src-addr")]
    pub src_addr: String,

    #[serde(rename = "src-port")]
    pub src_port: u64,

    #[serde(rename = "dest-addr")]
    pub dest_addr: String,

    #[serde(rename = "dest-port")]
    pub dest_port: u64,

    pub items: BTreeMap<String, String>,
}

/// Ordered body records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Body {
    pub items: Vec<String>,
}

/// The unit of work flowing source -> transform -> sink
///
/// Stages take and hand back messages by value; use `clone()` for an
/// explicit copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    pub header: Header,
    pub body: Body,
}

impl Message {
    /// Start building a message
    pub fn builder() -> MessageBuilder {
        MessageBuilder::default()
    }

    /// Look up a header item
    pub fn header_item(&self, key: &str) -> Option<&str> {
        self.header.items.get(key).map(String::as_str)
    }

    /// True if any body record equals `record`
    pub fn body_contains(&self, record: &str) -> bool {
        self.body.items.iter().any(|item| item == record)
    }
}

/// Fluent assembler for [`Message`]
#[derive(Debug, Default)]
pub struct MessageBuilder {
    msg: Message,
}

impl MessageBuilder {
    pub fn with_src_addr(mut self, addr: impl Into<String>) -> Self {
        self.msg.header.src_addr = addr.into();
        self
    }

    pub fn with_src_port(mut self, port: u64) -> Self {
        self.msg.header.src_port = port;
        self
    }

    pub fn with_dest_addr(mut self, addr: impl Into<String>) -> Self {
        self.msg.header.dest_addr = addr.into();
        self
    }

    pub fn with_dest_port(mut self, port: u64) -> Self {
        self.msg.header.dest_port = port;
        self
    }

    pub fn with_header_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.msg.header.items.insert(key.into(), value.into());
        self
    }

    pub fn with_body_item(mut self, record: impl Into<String>) -> Self {
        self.msg.body.items.push(record.into());
        self
    }

    pub fn build(self) -> Message {
        self.msg
    }
}
