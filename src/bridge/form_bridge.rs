//! Handlers wiring the four page interactions to the ticket backend.

use crate::bridge::{Event, Page};
use crate::config::BackendConfig;
use crate::models::{CustomerRegistration, Field, LoginRequest, Role, Section, TicketCreation};
use crate::services::{BackendClient, BackendReply, BridgeError, BridgeMetrics};
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

/// What a handler did to the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerOutcome {
    pub event: Event,
    /// Status of the backend reply, `None` when no reply could be read
    pub status: Option<u16>,
    /// Whether the reply status was 2xx
    pub ok: bool,
    /// Text shown to the user, in the login message area or an alert
    pub displayed: String,
    /// Role whose section was revealed by a successful login
    pub role: Option<Role>,
    pub reloaded: bool,
}

impl HandlerOutcome {
    fn replied(event: Event, reply: &BackendReply, displayed: String) -> Self {
        Self {
            event,
            status: Some(reply.status.as_u16()),
            ok: reply.ok(),
            displayed,
            role: None,
            reloaded: false,
        }
    }

    fn failed(event: Event, displayed: String) -> Self {
        Self {
            event,
            status: None,
            ok: false,
            displayed,
            role: None,
            reloaded: false,
        }
    }
}

/// Binds the login form, logout button, customer registration form and ticket
/// creation form to their backend endpoints.
///
/// Handlers take `&self` and share one session cookie jar, so independent
/// forms may be submitted concurrently.
#[derive(Clone)]
pub struct FormBridge {
    client: BackendClient,
    engineer_username: String,
}

impl FormBridge {
    pub fn new(client: BackendClient) -> Self {
        let engineer_username = client.config().engineer_username.clone();
        Self {
            client,
            engineer_username,
        }
    }

    /// Build the backend client and the bridge in one step
    pub fn from_config(
        config: BackendConfig,
        metrics: Option<BridgeMetrics>,
    ) -> Result<Self, BridgeError> {
        Ok(Self::new(BackendClient::new(config, metrics)?))
    }

    pub fn client(&self) -> &BackendClient {
        &self.client
    }

    /// Run the handler bound to `event`
    pub async fn dispatch<P>(&self, event: Event, page: &mut P) -> HandlerOutcome
    where
        P: Page + ?Sized,
    {
        let span = info_span!("handler", event = event.name(), request_id = %Uuid::new_v4());
        async {
            let outcome = match event {
                Event::LoginSubmit => self.submit_login(page).await,
                Event::LogoutClick => self.click_logout(page).await,
                Event::RegisterCustomerSubmit => self.submit_customer_registration(page).await,
                Event::CreateTicketSubmit => self.submit_ticket(page).await,
            };
            debug!(
                status = ?outcome.status,
                ok = outcome.ok,
                reloaded = outcome.reloaded,
                "Handler finished"
            );
            outcome
        }
        .instrument(span)
        .await
    }

    /// Login form: shows the reply in the login message area and, on success,
    /// swaps the login section for the logout section plus the role section.
    pub async fn submit_login<P>(&self, page: &mut P) -> HandlerOutcome
    where
        P: Page + ?Sized,
    {
        let request = LoginRequest {
            username: page.field_value(Field::Username),
            password: page.field_value(Field::Password),
        };

        let reply = match self.client.login(&request).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, "Login request failed");
                let text = err.user_message();
                page.set_login_message(&text);
                return HandlerOutcome::failed(Event::LoginSubmit, text);
            }
        };

        let text = reply.display_text();
        page.set_login_message(&text);
        let mut outcome = HandlerOutcome::replied(Event::LoginSubmit, &reply, text);

        if reply.ok() {
            page.set_section_visible(Section::Login, false);
            page.set_section_visible(Section::Logout, true);

            let role = Role::resolve(
                reply.reply.role.as_deref(),
                &request.username,
                &self.engineer_username,
            );
            page.set_section_visible(role.section(), true);
            info!(username = %request.username, role = ?role, "Logged in");
            outcome.role = Some(role);
        }

        outcome
    }

    /// Logout button: alerts the reply, then always reloads the page
    pub async fn click_logout<P>(&self, page: &mut P) -> HandlerOutcome
    where
        P: Page + ?Sized,
    {
        let mut outcome = match self.client.logout().await {
            Ok(reply) => {
                let text = reply.display_text();
                page.alert(&text);
                HandlerOutcome::replied(Event::LogoutClick, &reply, text)
            }
            Err(err) => {
                warn!(error = %err, "Logout request failed");
                let text = err.user_message();
                page.alert(&text);
                HandlerOutcome::failed(Event::LogoutClick, text)
            }
        };

        page.reload();
        outcome.reloaded = true;
        outcome
    }

    /// Customer registration form: alerts the reply, leaves the form as is
    pub async fn submit_customer_registration<P>(&self, page: &mut P) -> HandlerOutcome
    where
        P: Page + ?Sized,
    {
        let registration = CustomerRegistration {
            username: page.field_value(Field::CustomerUsername),
            password: page.field_value(Field::CustomerPassword),
        };

        let result = self.client.register_customer(&registration).await;
        alert_reply(Event::RegisterCustomerSubmit, result, page)
    }

    /// Ticket creation form: alerts the reply, leaves the form as is
    pub async fn submit_ticket<P>(&self, page: &mut P) -> HandlerOutcome
    where
        P: Page + ?Sized,
    {
        let ticket = TicketCreation {
            title: page.field_value(Field::TicketTitle),
            description: page.field_value(Field::TicketDescription),
        };

        let result = self.client.create_ticket(&ticket).await;
        alert_reply(Event::CreateTicketSubmit, result, page)
    }
}

fn alert_reply<P>(
    event: Event,
    result: Result<BackendReply, BridgeError>,
    page: &mut P,
) -> HandlerOutcome
where
    P: Page + ?Sized,
{
    match result {
        Ok(reply) => {
            let text = reply.display_text();
            page.alert(&text);
            HandlerOutcome::replied(event, &reply, text)
        }
        Err(err) => {
            warn!(event = event.name(), error = %err, "Request failed");
            let text = err.user_message();
            page.alert(&text);
            HandlerOutcome::failed(event, text)
        }
    }
}
