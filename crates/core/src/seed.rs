//! Mock data the demo store boots with.
//!
//! Everything here is fixed at process start and never written back.

use crate::admin::{AnalyticsPoint, CmsDraft, Kpi, Order, PendingPurchaseOrder, PriceListDocument};
use crate::catalog::{Catalog, Product};
use crate::types::{
    DraftId, DraftStatus, OrderChannel, OrderId, OrderStatus, Price, ProductId, PurchaseOrderId,
    Sku,
};

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    sku: &str,
    name: &str,
    description: &str,
    category: &str,
    price_cents: i64,
    b2b_price_cents: i64,
    stock: u32,
    image_id: u32,
    is_new: bool,
) -> Product {
    Product {
        id: ProductId::new(id),
        sku: Sku::new(sku),
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        price: Price::usd_cents(price_cents),
        b2b_price: Price::usd_cents(b2b_price_cents),
        stock,
        image: format!("https://picsum.photos/id/{image_id}/400/400"),
        is_new,
    }
}

/// The six-product demo catalog.
#[must_use]
pub fn catalog() -> Catalog {
    Catalog::new(vec![
        product(
            "1",
            "TECH-001",
            "Enterprise Server Blade",
            "High-performance computing node for scalable data centers.",
            "Hardware",
            129_900,
            89_900,
            45,
            0,
            true,
        ),
        product(
            "2",
            "ACC-042",
            "Ergonomic Mesh Chair",
            "Designed for 24/7 comfort with lumbar support.",
            "Office",
            34_900,
            19_900,
            120,
            1,
            false,
        ),
        product(
            "3",
            "NET-101",
            "Gigabit Switch 24-Port",
            "Managed switch with VLAN support and QoS.",
            "Networking",
            25_000,
            16_500,
            8,
            2,
            false,
        ),
        product(
            "4",
            "PER-555",
            "Wireless Mechanical Keyboard",
            "Tactile switches with multi-device bluetooth.",
            "Peripherals",
            12_000,
            8_500,
            200,
            3,
            false,
        ),
        product(
            "5",
            "MON-4K",
            "32\" 4K HDR Monitor",
            "Professional color accuracy for designers.",
            "Hardware",
            69_900,
            55_000,
            15,
            4,
            false,
        ),
        product(
            "6",
            "SOFT-CRM",
            "Nexus CRM License (Yearly)",
            "Cloud-based customer relationship management.",
            "Software",
            50_000,
            35_000,
            9999,
            5,
            false,
        ),
    ])
}

fn order(
    id: &str,
    customer_name: &str,
    total_cents: i64,
    status: OrderStatus,
    date: &str,
    channel: OrderChannel,
) -> Order {
    Order {
        id: OrderId::new(id),
        customer_name: customer_name.to_string(),
        total: Price::usd_cents(total_cents),
        status,
        date: date.to_string(),
        channel,
    }
}

/// Recent transactions shown on the admin dashboard.
#[must_use]
pub fn orders() -> Vec<Order> {
    vec![
        order(
            "ORD-7721",
            "Acme Corp",
            450_000,
            OrderStatus::Processing,
            "2023-10-25",
            OrderChannel::B2b,
        ),
        order(
            "ORD-7722",
            "Jane Doe",
            12_000,
            OrderStatus::Shipped,
            "2023-10-24",
            OrderChannel::B2c,
        ),
        order(
            "ORD-7723",
            "Globex Inc",
            1_250_000,
            OrderStatus::Delivered,
            "2023-10-23",
            OrderChannel::B2b,
        ),
        order(
            "ORD-7724",
            "John Smith",
            34_900,
            OrderStatus::ReturnRequested,
            "2023-10-22",
            OrderChannel::B2c,
        ),
    ]
}

/// Seven months of channel sales, oldest first.
#[must_use]
pub fn analytics() -> Vec<AnalyticsPoint> {
    [
        ("Jan", 4000, 2400),
        ("Feb", 3000, 1398),
        ("Mar", 2000, 9800),
        ("Apr", 2780, 3908),
        ("May", 1890, 4800),
        ("Jun", 2390, 3800),
        ("Jul", 3490, 4300),
    ]
    .into_iter()
    .map(|(name, b2c_sales, b2b_sales)| AnalyticsPoint {
        name: name.to_string(),
        b2c_sales,
        b2b_sales,
    })
    .collect()
}

/// Content drafts awaiting staging decisions.
#[must_use]
pub fn cms_drafts() -> Vec<CmsDraft> {
    [
        ("CMS-001", "Home / Hero Banner", "Marketing Team", DraftStatus::Staged, "10 mins ago"),
        ("CMS-002", "Policy / Returns", "Legal Dept", DraftStatus::Draft, "2 hours ago"),
        ("CMS-003", "Product / Holiday Promo", "Sales Manager", DraftStatus::Live, "1 day ago"),
    ]
    .into_iter()
    .map(|(id, page, author, status, last_modified)| CmsDraft {
        id: DraftId::new(id),
        page: page.to_string(),
        author: author.to_string(),
        status,
        last_modified: last_modified.to_string(),
    })
    .collect()
}

/// Purchase orders waiting for a B2B approver.
#[must_use]
pub fn pending_purchase_orders() -> Vec<PendingPurchaseOrder> {
    vec![
        PendingPurchaseOrder {
            id: PurchaseOrderId::new("PO-9921"),
            requester: "John Smith".to_string(),
            items: 12,
            total: Price::usd_cents(245_000),
            date: "Oct 26, 2023".to_string(),
        },
        PendingPurchaseOrder {
            id: PurchaseOrderId::new("PO-9924"),
            requester: "Sarah Lee".to_string(),
            items: 45,
            total: Price::usd_cents(890_000),
            date: "Oct 25, 2023".to_string(),
        },
    ]
}

/// Negotiated price list downloads.
#[must_use]
pub fn price_lists() -> Vec<PriceListDocument> {
    vec![
        PriceListDocument {
            title: "Q4 2023 Global Hardware.pdf".to_string(),
            updated: "Oct 15, 2023".to_string(),
            size: "2.4 MB".to_string(),
        },
        PriceListDocument {
            title: "2024 Software Licenses.csv".to_string(),
            updated: "Oct 20, 2023".to_string(),
            size: "156 KB".to_string(),
        },
    ]
}

/// Partner tier note shown beside the price lists.
pub const PARTNER_TIER_NOTE: &str = "Your organization currently enjoys Tier 1 pricing \
(15-30% off retail) on all hardware categories. Next review: Jan 2024.";

/// Headline KPI cards.
#[must_use]
pub fn kpis() -> Vec<Kpi> {
    [
        ("Total Revenue", "$45,231.89", "+12.5% vs last month"),
        ("B2B Orders", "1,240", "45 pending approval"),
        ("Processing", "56", "Avg fulfillment: 1.2 days"),
        ("RMA Requests", "12", "Requires attention"),
    ]
    .into_iter()
    .map(|(label, value, note)| Kpi {
        label: label.to_string(),
        value: value.to_string(),
        note: note.to_string(),
    })
    .collect()
}
