//! Plain-text rendering for terminal output

use chrono::Utc;
use std::fmt::Write;
use threadline_sdk::{
    Candidate, ChainEvent, Dashboard, EventKind, Provenance, Purchase, SectionItems, Submission,
    Tier, TxReceipt, UserInfo,
};

fn holder<T: Tier>(entity: &T) -> String {
    if entity.next_owner().is_zero() {
        "-".to_string()
    } else {
        entity.next_owner().short()
    }
}

fn date(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| chrono::DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// One row per entity
pub fn tier_table<T: Tier>(items: &[T]) -> String {
    if items.is_empty() {
        return "  (none)\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:>4}  {:<24} {:>14}  {:<9} {:<13} {:<13} {:<16}",
        "ID", "NAME", "PRICE", "STATUS", "FROM", "HELD BY", "CREATED"
    );
    for item in items {
        let status = if item.is_available() { "available" } else { "sold" };
        let created = item
            .created_at()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "  {:>4}  {:<24} {:>14}  {:<9} {:<13} {:<13} {:<16}",
            item.id(),
            item.name(),
            item.price().to_string(),
            status,
            item.origin().short(),
            holder(item),
            created
        );
    }
    out
}

pub fn section_items(items: &SectionItems) -> String {
    match items {
        SectionItems::RawMaterial(v) => tier_table(v),
        SectionItems::Fabric(v) => tier_table(v),
        SectionItems::Apparel(v) => tier_table(v),
        SectionItems::PackagedStock(v) => tier_table(v),
        SectionItems::RetailProduct(v) => tier_table(v),
    }
}

pub fn user(user: &UserInfo) -> String {
    match user.role {
        Some(role) => format!(
            "{} ({}){}\nregistered {}",
            user.name,
            role,
            if user.location.is_empty() {
                String::new()
            } else {
                format!(", {}", user.location)
            },
            date(user.registration_date)
        ),
        None => "not registered".to_string(),
    }
}

pub fn dashboard(user: &UserInfo, dashboard: &Dashboard) -> String {
    let mut out = format!(
        "{} dashboard for {} ({})\n",
        dashboard.role, user.name, dashboard.account
    );
    for section in &dashboard.sections {
        let _ = writeln!(out, "\n{} [{}]", section.title, section.items.len());
        out.push_str(&section_items(&section.items));
    }
    if !dashboard.notifications.is_empty() {
        out.push('\n');
        for notification in &dashboard.notifications {
            let _ = writeln!(out, "{}", notification);
        }
    }
    out
}

pub fn candidates(candidates: &[Candidate]) -> String {
    if candidates.is_empty() {
        return "nothing to select".to_string();
    }
    candidates
        .iter()
        .map(|c| format!("  {:>4}  {}", c.id, c.name))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn receipt(receipt: &TxReceipt) -> String {
    format!("tx {} (block {})", receipt.transaction_hash, receipt.block_number)
}

pub fn submission(submission: &Submission) -> String {
    format!(
        "{}, {}\nmetadata {}\ncode target {}\nnext: {}",
        submission.notification(),
        receipt(&submission.receipt),
        submission.content_id,
        submission.code_target,
        submission.redirect
    )
}

pub fn purchase(purchase: &Purchase) -> String {
    format!("{}, {}", purchase.notification(), receipt(&purchase.receipt))
}

pub fn history(events: &[ChainEvent]) -> String {
    if events.is_empty() {
        return "no events".to_string();
    }
    let mut out = String::new();
    for event in events {
        let what = match &event.kind {
            EventKind::Created(kind) => format!("created {}", kind),
            EventKind::Purchased(kind) => format!("bought {}", kind),
            EventKind::UserRegistered => "registered".to_string(),
            EventKind::Other => event.name.clone(),
        };
        let id = event.entity_id.map(|id| format!(" #{}", id)).unwrap_or_default();
        let price = event.price.map(|p| format!(" for {}", p)).unwrap_or_default();
        let when = event.timestamp.map(date).unwrap_or_else(|| "-".to_string());
        let who = event
            .participants
            .iter()
            .map(|a| a.short())
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            out,
            "{:>8}  {:<16}  {}{}{}  [{}]",
            event.block_number, when, what, id, price, who
        );
    }
    out
}

pub fn provenance(trace: &Provenance) -> String {
    let mut out = format!(
        "{} #{} by {}\n",
        trace.retail_product.name,
        trace.retail_product.id,
        trace.retail_product.brand
    );
    let _ = writeln!(out, "\npackaged stock");
    out.push_str(&tier_table(&trace.packaged_stock));
    let _ = writeln!(out, "\napparel");
    out.push_str(&tier_table(&trace.apparel));
    let _ = writeln!(out, "\nfabrics");
    out.push_str(&tier_table(&trace.fabrics));
    let _ = writeln!(out, "\nraw materials");
    out.push_str(&tier_table(&trace.raw_materials));

    let _ = writeln!(out, "\nparticipants");
    for (role, address) in trace.participants() {
        let _ = writeln!(out, "  {:<13} {}", role, address);
    }
    if !trace.is_complete() {
        let missing = trace
            .missing
            .iter()
            .map(|(kind, id)| format!("{} {}", kind, id))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "\nincomplete, could not load: {}", missing);
    }
    out
}
