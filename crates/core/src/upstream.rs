//! The upstream domains the reporting layer fans out to.

use serde::{Deserialize, Serialize};

/// One upstream domain service.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Upstream {
    Finance,
    Hr,
    Inventory,
}

impl Upstream {
    /// All upstreams, in report section order.
    pub const ALL: [Upstream; 3] = [Upstream::Finance, Upstream::Hr, Upstream::Inventory];

    pub fn as_str(&self) -> &'static str {
        match self {
            Upstream::Finance => "finance",
            Upstream::Hr => "hr",
            Upstream::Inventory => "inventory",
        }
    }

    /// Read-only summary endpoint, relative to the service base address.
    pub fn summary_path(&self) -> &'static str {
        match self {
            Upstream::Finance => "api/finance-summary",
            Upstream::Hr => "api/hr-summary",
            Upstream::Inventory => "api/inventory-summary",
        }
    }
}

impl core::fmt::Display for Upstream {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
