//! Static use-case catalog: clusters, their keywords, guides, endpoints and warnings,
//! plus the header and boost tables the formatters consult.

use std::fmt;

/// Identifier of a use-case cluster. Declaration order is catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClusterId {
    Authentication,
    ApWorkflow,
    ErpIntegration,
    CardManagement,
    UserManagement,
    ExpenseReporting,
    Agents,
    Webhooks,
}

impl ClusterId {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::ApWorkflow => "ap_workflow",
            Self::ErpIntegration => "erp_integration",
            Self::CardManagement => "card_management",
            Self::UserManagement => "user_management",
            Self::ExpenseReporting => "expense_reporting",
            Self::Agents => "agents",
            Self::Webhooks => "webhooks",
        }
    }

    /// Heading used by the guidance formatter.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Authentication => "Authentication & Authorization",
            Self::ApWorkflow => "Accounts Payable & Bill Management",
            Self::ErpIntegration => "ERP/Accounting Integration",
            Self::CardManagement => "Card Management & Spending Controls",
            Self::UserManagement => "User Management & Onboarding",
            Self::ExpenseReporting => "Expense Reporting & Analytics",
            Self::Agents => "AI Agents & MCP Integration",
            Self::Webhooks => "Webhooks & Real-Time Events",
        }
    }

    /// Human label, e.g. `ap_workflow` -> `Ap Workflow`.
    pub fn label(&self) -> String {
        title_case(&self.as_str().replace('_', " "))
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A use-case cluster.
#[derive(Debug)]
pub struct Cluster {
    pub id: ClusterId,
    pub keywords: &'static [&'static str],
    pub guides: &'static [&'static str],
    pub endpoints: &'static [&'static str],
    pub warnings: &'static [&'static str],
}

impl Cluster {
    /// The guide the formatters read. Only the first one is used.
    pub fn primary_guide(&self) -> Option<&'static str> {
        self.guides.first().copied()
    }

    pub fn owns_endpoint(&self, path: &str) -> bool {
        self.endpoints.contains(&path)
    }
}

pub const CORS_WARNING: &str = "⚠️ CRITICAL: Never call /developer/v1/token from browser JavaScript! This causes CORS errors. For browser-based apps: (1) Use OAuth2 Authorization Code flow to redirect users to Ramp for authentication, or (2) Use your backend server to proxy token requests with client_credentials flow.";

pub static CATALOG: &[Cluster] = &[
    Cluster {
        id: ClusterId::Authentication,
        keywords: &[
            "authentication",
            "setup",
            "auth",
            "oauth",
            "authorization code",
            "internal integration",
            "oauth flows",
            "access token",
            "bearer token",
            "refresh token",
        ],
        guides: &["authorization.mdx"],
        endpoints: &["/developer/v1/token"],
        warnings: &[CORS_WARNING],
    },
    Cluster {
        id: ClusterId::ApWorkflow,
        keywords: &[
            "bills",
            "accounts payable",
            "ap",
            "vendors",
            "payments",
            "bill pay",
            "invoice",
        ],
        guides: &["guides/bill-pay.mdx"],
        endpoints: &[
            "/developer/v1/bills",
            "/developer/v1/bills/drafts",
            "/developer/v1/vendors",
            "/developer/v1/vendors/{vendor_id}/accounts",
            "/developer/v1/vendors/{vendor_id}/update-bank-accounts",
        ],
        warnings: &["In Ramp's API, payments are not managed by their own endpoints. Payment information is nested within the Bills endpoint and bill payments are executed by creating Bills."],
    },
    Cluster {
        id: ClusterId::ErpIntegration,
        keywords: &["erp", "accounting", "gl", "sync"],
        guides: &["guides/accounting.mdx"],
        endpoints: &[
            "/developer/v1/accounting/accounts",
            "/developer/v1/accounting/syncs",
            "/developer/v1/accounting/connection",
            "/developer/v1/accounting/vendors",
            "/developer/v1/accounting/fields",
        ],
        warnings: &[],
    },
    Cluster {
        id: ClusterId::CardManagement,
        keywords: &[
            "cards",
            "virtual cards",
            "card create",
            "card issue",
            "card creation",
            "card issuing",
            "card endpoints",
            "limits",
            "spend limits",
            "spending limits",
            "spend programs",
            "card programs",
            "card management",
            "funds",
            "funding",
            "card funding",
            "card budget",
            "balance management",
            "virtual card budget",
            "card allowance",
            "budget control",
            "spend allowance",
        ],
        guides: &["guides/cards-and-funds.mdx"],
        endpoints: &[
            "/developer/v1/limits",
            "/developer/v1/limits/{spend_limit_id}",
            "/developer/v1/cards/deferred/physical",
            "/developer/v1/spend-programs",
            "/developer/v1/card-programs",
        ],
        warnings: &["All /cards endpoints except for /developer/v1/cards/deferred/physical are deprecated and should not be used. In Ramp's API, virtual cards are funded through 'limits' endpoints. Create a limit first to set the budget, then assign it to a user to automatically generate a virtual card."],
    },
    Cluster {
        id: ClusterId::UserManagement,
        keywords: &["users", "team", "onboarding", "permissions", "departments"],
        guides: &[],
        endpoints: &[
            "/developer/v1/users",
            "/developer/v1/departments",
            "/developer/v1/locations",
            "/developer/v1/entities",
        ],
        warnings: &[],
    },
    Cluster {
        id: ClusterId::ExpenseReporting,
        keywords: &["expenses", "transactions", "export", "reporting", "analytics"],
        guides: &[],
        endpoints: &["/developer/v1/transactions", "/developer/v1/receipts"],
        warnings: &[],
    },
    Cluster {
        id: ClusterId::Agents,
        keywords: &[
            "mcp",
            "agents",
            "ai",
            "claude",
            "automation",
            "workflows",
            "mcp integration",
            "model context protocol",
            "mcp server",
            "mcp setup",
        ],
        guides: &["guides/ramp-mcp-remote.mdx"],
        endpoints: &[],
        warnings: &[],
    },
    Cluster {
        id: ClusterId::Webhooks,
        keywords: &[
            "webhooks",
            "webhook",
            "real-time",
            "events",
            "notifications",
            "push notifications",
            "event subscriptions",
            "webhook subscription",
            "webhook endpoint",
            "real time updates",
            "event driven",
            "real time",
            "push",
            "subscribe",
            "notification",
        ],
        guides: &["webhooks.mdx"],
        endpoints: &["/developer/v1/webhooks"],
        warnings: &[],
    },
];

/// Single-token keywords that match too easily inside other words.
pub const LOW_SPECIFICITY_KEYWORDS: &[&str] = &["ap", "ai"];

pub fn cluster(id: ClusterId) -> Option<&'static Cluster> {
    CATALOG.iter().find(|c| c.id == id)
}

/// First cluster (catalog order) listing `path` among its endpoints.
pub fn cluster_for_endpoint(path: &str) -> Option<&'static Cluster> {
    CATALOG.iter().find(|c| c.owns_endpoint(path))
}

/// Headers the guidance formatter extracts from any guide.
pub const GUIDANCE_HEADERS: &[&str] = &[
    "## Overview",
    "## Getting Started",
    "## Quick Start",
    "## Implementation",
    "## Best Practices",
    "## Common Pitfalls",
    "## Examples",
    "## Next Steps",
    "## How It Works",
    "## How to Get Started",
    "## Key Features",
    "## Example Use Cases",
    "## Why Use",
    "## Sample Code",
];

/// OAuth-specific headers used instead of [`GUIDANCE_HEADERS`] for authentication.
pub const AUTH_GUIDANCE_HEADERS: &[&str] = &[
    "## Understanding environments",
    "## Quickstart: Authorize with Client Credentials",
    "### 1. Create a Developer App",
    "### 2. Request an Access Token",
    "### 3. Make an API Call",
    "## FAQ: Client credentials flow",
    "## Authorization code: For multi-customer apps",
    "### Step 1: User is redirected to Ramp authorization URL",
    "### Step 2: User authenticates and approves access",
    "### Step 3: Exchange the `code` for an access token",
    "### Step 4: Refresh the access token",
    "## FAQ: Authorization code flow",
    "## Next steps",
    "## OAuth 2.0 Framework",
    "## Permission Model & Scopes",
    "## Token Management",
    "## Authorization Flow Deep Dive",
    "### Client Credentials Flow",
    "### Authorization Code Flow",
];

/// Header list and per-section character cap for the guidance path.
pub fn guidance_headers(id: ClusterId) -> (&'static [&'static str], usize) {
    match id {
        ClusterId::Authentication => (AUTH_GUIDANCE_HEADERS, 1200),
        _ => (GUIDANCE_HEADERS, 1000),
    }
}

/// Headers the search path tries on the top-ranked guide.
pub const SEARCH_HEADERS: &[&str] = &[
    "## Overview",
    "## Getting Started",
    "## Quick Start",
    "## Quickstart",
    "## How to Get Started",
    "## Implementation",
    "## Examples",
    "## Best Practices",
    "## Authentication",
    "## Authorization",
];

/// Cluster-specific headers appended to [`SEARCH_HEADERS`].
pub fn search_extra_headers(id: Option<ClusterId>) -> &'static [&'static str] {
    match id {
        Some(ClusterId::Authentication) => &[
            "## Understanding environments",
            "## Quickstart: Authorize with Client Credentials",
            "## Authorization code: For multi-customer apps",
            "## OAuth 2.0 Framework",
        ],
        Some(ClusterId::ApWorkflow) => &[
            "## Bill Pay API",
            "## Vendor Management",
            "## Payment Processing",
        ],
        _ => &[],
    }
}

/// Query keyword -> guide filenames that get a relevance boost.
pub const KEYWORD_BOOSTS: &[(&str, &[&str])] = &[
    ("auth", &["authorization.mdx", "guides/getting-started.mdx"]),
    ("oauth", &["authorization.mdx", "guides/getting-started.mdx"]),
    ("bill", &["guides/bill-pay.mdx"]),
    ("payment", &["guides/bill-pay.mdx"]),
    ("card", &["guides/single-use-cards.mdx", "guides/cards-and-funds.mdx"]),
    ("webhook", &["webhooks.mdx"]),
    ("accounting", &["guides/accounting.mdx"]),
    ("mcp", &["guides/ramp-mcp-remote.mdx"]),
];

/// Display titles for well-known guides.
pub const GUIDE_TITLES: &[(&str, &str)] = &[
    ("authorization.mdx", "Authentication & Authorization"),
    ("guides/getting-started.mdx", "Getting Started Guide"),
    ("guides/bill-pay.mdx", "Bill Payments & Accounts Payable"),
    ("guides/accounting.mdx", "Accounting & ERP Integration"),
    ("guides/single-use-cards.mdx", "Card Management"),
    ("guides/cards-and-funds.mdx", "Cards & Funds Management"),
    ("webhooks.mdx", "Webhooks & Real-Time Events"),
    ("guides/ramp-mcp-remote.mdx", "AI Agents & MCP Integration"),
];

/// Friendly title for a guide identifier: exact entry, then partial, then a cleaned filename.
pub fn guide_title(identifier: &str) -> String {
    if let Some((_, title)) = GUIDE_TITLES.iter().find(|(key, _)| *key == identifier) {
        return (*title).to_string();
    }

    if let Some((_, title)) = GUIDE_TITLES
        .iter()
        .find(|(key, _)| key.contains(identifier) || identifier.contains(key))
    {
        return (*title).to_string();
    }

    let cleaned = identifier
        .replace(".mdx", "")
        .replace("guides/", "")
        .replace('-', " ");
    title_case(&cleaned)
}

/// Conceptual notes shown next to endpoints whose semantics surprise newcomers.
pub fn endpoint_context(path: &str) -> Option<&'static str> {
    match path {
        "/developer/v1/limits" => Some("In Ramp's API, 'limits' are spending limits that control virtual card budgets. When you create a limit, it defines the spending allowance for a virtual card. Think of limits as the 'funding' mechanism for cards."),
        "/developer/v1/limits/{spend_limit_id}" => Some("This endpoint manages individual spending limits that control virtual card funds. Each limit acts as a budget container that restricts how much can be spent on associated cards."),
        "/developer/v1/cards" => Some("Virtual cards in Ramp are automatically created when you assign a spending limit (via /limits endpoints) to a user. The limit controls the card's budget."),
        "/developer/v1/cards/{card_id}" => Some("Card details and management. Note: The card's spending power is controlled by its associated limit (see /limits endpoints)."),
        "/developer/v1/spend-programs" => Some("Spend programs are reusable templates that define spending policies. They work with limits to control virtual card behavior and restrictions."),
        "/developer/v1/card-programs" => Some("Card programs define the physical/virtual card properties and are separate from spending limits that control the budget."),
        _ => None,
    }
}

/// How an endpoint fits into a multi-step workflow.
pub fn endpoint_workflow(path: &str) -> Option<&'static str> {
    match path {
        "/developer/v1/limits" => Some("1) Create limit (sets budget) → 2) Assign to user → 3) Virtual card automatically created → 4) Card funded by the limit"),
        "/developer/v1/cards" => Some("Virtual cards are created automatically when limits are assigned. To issue a virtual card: create a limit first, then assign it to a user."),
        "/developer/v1/spend-programs" => Some("Optional step: Create spend program → Use in limit creation → Limit controls virtual card → Card inherits spending restrictions"),
        _ => None,
    }
}

/// Uppercases the first letter of every alphabetic run and lowercases the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_cluster_id_is_in_the_catalog_once() {
        for c in CATALOG {
            assert_eq!(CATALOG.iter().filter(|o| o.id == c.id).count(), 1);
            assert_eq!(cluster(c.id).map(|found| found.id), Some(c.id));
        }
        assert_eq!(CATALOG.len(), 8);
    }

    #[test]
    fn keywords_are_lowercase() {
        for c in CATALOG {
            for kw in c.keywords {
                assert_eq!(*kw, kw.to_lowercase(), "{} keyword {kw}", c.id);
            }
        }
    }

    #[test]
    fn endpoint_lookup_finds_owner() {
        assert_eq!(
            cluster_for_endpoint("/developer/v1/bills").map(|c| c.id),
            Some(ClusterId::ApWorkflow)
        );
        assert!(cluster_for_endpoint("/developer/v1/unknown").is_none());
    }

    #[test]
    fn guide_title_falls_back_to_filename() {
        assert_eq!(guide_title("guides/bill-pay.mdx"), "Bill Payments & Accounts Payable");
        assert_eq!(guide_title("webhooks.mdx"), "Webhooks & Real-Time Events");
        assert_eq!(guide_title("guides/spend-controls.mdx"), "Spend Controls");
    }

    #[test]
    fn labels_are_title_cased() {
        assert_eq!(ClusterId::ApWorkflow.label(), "Ap Workflow");
        assert_eq!(ClusterId::CardManagement.label(), "Card Management");
    }
}
