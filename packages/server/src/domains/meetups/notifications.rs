//! Email text for change events.
//!
//! Rendering only. Delivery, retries and SMTP belong to whoever consumes the
//! published events.

use serde::Serialize;

use super::events::{MeetupEvent, OwnerContact};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Build the email an event warrants, if any.
///
/// Creation mails go to any owner contact. Participant mails go only when
/// the owner turned alerts on. Everything else is silent.
pub fn render(event: &MeetupEvent, hostname: &str) -> Option<EmailMessage> {
    match event {
        MeetupEvent::EventCreated {
            owner_token,
            participant_token,
            contact,
        } => {
            let to = recipient(contact, false)?;
            let body = format!(
                "A meetup has been created.\r\n\r\n\
                 Use this link to edit the meetup: https://{host}/edit?id={owner}\r\n\r\n\
                 Share this link with the meetup participants: https://{host}/view?id={participant}\r\n",
                host = hostname,
                owner = urlencoding::encode(owner_token.as_str()),
                participant = urlencoding::encode(participant_token.as_str()),
            );
            Some(EmailMessage {
                to,
                subject: "A meetup was created.".to_string(),
                body,
            })
        }
        MeetupEvent::ParticipantAdded {
            participant_token,
            name,
            contact,
        } => Some(EmailMessage {
            to: recipient(contact, true)?,
            subject: format!("New user {:?} was added to the meetup.", name),
            body: view_link(hostname, participant_token.as_str()),
        }),
        MeetupEvent::ParticipantChanged {
            participant_token,
            name,
            contact,
        } => Some(EmailMessage {
            to: recipient(contact, true)?,
            subject: format!("User {:?} changed their meetup availability.", name),
            body: view_link(hostname, participant_token.as_str()),
        }),
        MeetupEvent::EventUpdated { .. }
        | MeetupEvent::EventDeleted { .. }
        | MeetupEvent::ParticipantRemoved { .. } => None,
    }
}

fn recipient(contact: &OwnerContact, needs_alerts: bool) -> Option<String> {
    if contact.email.is_empty() || (needs_alerts && !contact.alerts) {
        return None;
    }
    Some(contact.email.clone())
}

fn view_link(hostname: &str, participant_token: &str) -> String {
    format!(
        "View the meetup here: https://{}/view?id={}\r\n",
        hostname,
        urlencoding::encode(participant_token)
    )
}
