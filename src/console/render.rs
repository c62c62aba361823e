use chrono_tz::Tz;

use crate::{
    domain::{ClassificationResult, Message},
    inbox::{messages_in, DashboardStats, Session, View},
};

pub fn parse_timezone(name: &str) -> Tz {
    name.parse().unwrap_or_else(|_| {
        tracing::warn!(target: "app", timezone = name, "unknown display timezone; using UTC");
        Tz::UTC
    })
}

pub fn confidence_percent(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

pub fn render_message(message: &Message, tz: &Tz) -> String {
    let sent = message.timestamp.with_timezone(tz).format("%Y-%m-%d %H:%M");
    let corrected = if message.user_corrected {
        " [corrected]"
    } else {
        ""
    };
    format!(
        "{id}  {sender}  {sent}  {label} ({confidence}){corrected}\n    {content}",
        id = message.id,
        sender = message.sender,
        label = message.classification,
        confidence = confidence_percent(message.model_confidence),
        content = message.content,
    )
}

pub fn render_view(session: &Session, view: View, tz: &Tz) -> String {
    let Some(inbox) = session.inbox() else {
        return not_granted();
    };
    if inbox.is_seeding() {
        return "Scanning and classifying messages...".to_string();
    }

    let messages = messages_in(inbox.store(), view);
    let mut out = format!("{} ({})", view.label(), messages.len());
    if messages.is_empty() {
        out.push_str("\n  no messages");
    }
    for message in messages {
        out.push('\n');
        out.push_str(&render_message(message, tz));
    }
    out
}

pub fn render_dashboard(session: &Session) -> String {
    let Some(inbox) = session.inbox() else {
        return not_granted();
    };
    if inbox.is_seeding() {
        return "Scanning and classifying messages...".to_string();
    }
    let stats = DashboardStats::compute(inbox.store());
    let mut out = format!(
        "Total messages scanned: {}\nSpam messages blocked:  {}\nInbox messages:         {}\nSpam percentage:        {:.1}%",
        stats.total, stats.spam, stats.not_spam, stats.spam_percentage
    );
    if inbox.pending_simulations() > 0 {
        out.push_str(&format!(
            "\nClassifying {} incoming message(s)...",
            inbox.pending_simulations()
        ));
    }
    out
}

pub fn render_sandbox(content: &str, result: &ClassificationResult) -> String {
    format!(
        "\"{content}\"\n  Classification: {}\n  AI confidence:  {}",
        result.classification,
        confidence_percent(result.confidence)
    )
}

fn not_granted() -> String {
    "SMS permission not granted. Type `grant` to start scanning.".to_string()
}
