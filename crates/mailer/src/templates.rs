//! Subjects and HTML bodies for outgoing mail.

use eventhall_core::models::event::EventSummary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub subject: String,
    pub html: String,
}

/// Escapes the characters that matter inside HTML text and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn when(event: &EventSummary) -> String {
    format!(
        "{} to {}",
        event.start.format("%A, %B %-d %Y, %H:%M UTC"),
        event.end.format("%A, %B %-d %Y, %H:%M UTC")
    )
}

fn wrap(heading: &str, inner: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
        <h2 style="color: #2563eb;">{heading}</h2>
{inner}
        <hr>
        <p style="color: #666; font-size: 12px;">Thank you for using our platform!</p>
    </div>
</body>
</html>
"#
    )
}

pub fn approval(event_name: &str, join_link: &str) -> Email {
    let name = escape_html(event_name);
    let link = escape_html(join_link);

    Email {
        subject: format!("Your Event \"{event_name}\" is Approved!"),
        html: wrap(
            "Congratulations!",
            &format!(
                r#"        <p>Your event <strong>{name}</strong> has been approved.</p>
        <p><b>Join link for attendees:</b> <a href="{link}" target="_blank">{link}</a></p>
        <p>Please share this link with your attendees.</p>"#
            ),
        ),
    }
}

pub fn reminder(attendee_name: &str, event: &EventSummary) -> Email {
    Email {
        subject: format!("Reminder: \"{}\" is coming up", event.name),
        html: wrap(
            "Event Reminder",
            &format!(
                r#"        <p>Hi {attendee},</p>
        <p>This is a reminder that <strong>{name}</strong> takes place at {location}.</p>
        <p><b>When:</b> {when}</p>
        <p>We look forward to seeing you there.</p>"#,
                attendee = escape_html(attendee_name),
                name = escape_html(&event.name),
                location = escape_html(&event.location),
                when = when(event),
            ),
        ),
    }
}

pub fn registration_confirmation(attendee_name: &str, event: &EventSummary) -> Email {
    Email {
        subject: format!("You're registered for \"{}\"", event.name),
        html: wrap(
            "Registration Confirmed",
            &format!(
                r#"        <p>Hi {attendee},</p>
        <p>Your registration for <strong>{name}</strong> at {location} is confirmed.</p>
        <p><b>When:</b> {when}</p>"#,
                attendee = escape_html(attendee_name),
                name = escape_html(&event.name),
                location = escape_html(&event.location),
                when = when(event),
            ),
        ),
    }
}
