use clap::Parser;
use prometheus::Registry;
use std::io::{IsTerminal, Write};
use ticket_desk::services::metrics::render;
use ticket_desk::{
    BackendConfig, BridgeMetrics, Event, Field, FormBridge, LOGIN_MESSAGE_ID, MemoryPage, Page,
    Section, TelemetryConfig, ViewState, init_tracing,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;

const HELP: &str = "\
Commands:
  login      submit the login form
  logout     click the logout button
  register   submit the customer registration form
  ticket     submit the ticket creation form
  view       show the visible sections
  show <id>  show one page element by id (e.g. login-message, password)
  help       show this help
  quit       leave";

#[derive(Parser)]
#[command(name = "ticket-desk")]
#[command(about = "Terminal front-end for the basic ticket-management backend", long_about = None)]
struct Cli {
    /// Backend base URL (overrides TICKET_DESK_BASE_URL)
    #[arg(short, long)]
    url: Option<String>,

    /// Emit logs as JSON lines (overrides TICKET_DESK_LOG_JSON)
    #[arg(long)]
    json_logs: bool,

    /// Print the request metrics on quit
    #[arg(long)]
    metrics: bool,
}

/// Page rendered on the terminal: alerts and the login message are printed,
/// section changes are reflected by the `view` command.
struct TerminalPage {
    inner: MemoryPage,
}

impl TerminalPage {
    fn new() -> Self {
        Self {
            inner: MemoryPage::new(),
        }
    }

    fn fill(&mut self, field: Field, value: String) {
        self.inner.set_field(field, value);
    }

    fn view(&self) -> ViewState {
        self.inner.view()
    }

    fn login_message(&self) -> &str {
        self.inner.login_message()
    }
}

impl Page for TerminalPage {
    fn field_value(&self, field: Field) -> String {
        self.inner.field_value(field)
    }

    fn set_login_message(&mut self, text: &str) {
        println!("{text}");
        self.inner.set_login_message(text);
    }

    fn set_section_visible(&mut self, section: Section, visible: bool) {
        self.inner.set_section_visible(section, visible);
    }

    fn alert(&mut self, text: &str) {
        println!("[alert] {text}");
        self.inner.alert(text);
    }

    fn reload(&mut self) {
        println!("(page reloaded)");
        self.inner.reload();
    }
}

fn print_view(view: &ViewState) {
    let names: Vec<&str> = view.visible_sections().into_iter().map(Section::id).collect();
    println!("visible: {}", names.join(", "));
}

/// Describe the element with `id`; secret field values are masked
fn describe_element(page: &TerminalPage, id: &str) -> Option<String> {
    if id == LOGIN_MESSAGE_ID {
        return Some(format!("{id}: {}", page.login_message()));
    }
    if let Some(section) = Section::from_id(id) {
        let state = if page.view().is_visible(section) {
            "visible"
        } else {
            "hidden"
        };
        return Some(format!("{id}: {state}"));
    }
    let field = Field::from_id(id)?;
    let value = page.field_value(field);
    if field.is_secret() {
        Some(format!("{id}: {}", "*".repeat(value.chars().count())))
    } else {
        Some(format!("{id}: {value}"))
    }
}

async fn prompt(
    lines: &mut Lines<BufReader<Stdin>>,
    label: &str,
) -> std::io::Result<Option<String>> {
    print!("{label}");
    std::io::stdout().flush()?;
    lines.next_line().await
}

/// Read a password without echo when attached to a terminal
async fn prompt_secret(
    lines: &mut Lines<BufReader<Stdin>>,
    label: &str,
) -> std::io::Result<Option<String>> {
    if !std::io::stdin().is_terminal() {
        return prompt(lines, label).await;
    }
    let label = label.to_string();
    let value = tokio::task::spawn_blocking(move || rpassword::prompt_password(label))
        .await
        .map_err(std::io::Error::other)??;
    Ok(Some(value))
}

/// Prompt for each field of a form; `None` when stdin closes
async fn fill_form(
    lines: &mut Lines<BufReader<Stdin>>,
    page: &mut TerminalPage,
    fields: &[Field],
) -> std::io::Result<Option<()>> {
    for field in fields {
        let label = format!("{}: ", field.id());
        let value = if field.is_secret() {
            prompt_secret(lines, &label).await?
        } else {
            prompt(lines, &label).await?
        };
        match value {
            Some(value) => page.fill(*field, value),
            None => return Ok(None),
        }
    }
    Ok(Some(()))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut telemetry = TelemetryConfig::from_env();
    telemetry.json |= cli.json_logs;
    init_tracing(&telemetry).map_err(|e| e as Box<dyn std::error::Error>)?;

    let mut config = BackendConfig::from_env();
    if let Some(url) = cli.url {
        config = config.with_base_url(url);
    }

    let registry = Registry::new();
    let metrics = if cli.metrics {
        Some(BridgeMetrics::new(&registry)?)
    } else {
        None
    };

    let bridge = FormBridge::from_config(config, metrics)?;
    info!(
        base_url = %bridge.client().base_url(),
        version = env!("CARGO_PKG_VERSION"),
        commit = option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
        build_time = option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown"),
        "Ticket desk started"
    );

    println!("Ticket desk at {}", bridge.client().base_url());
    println!("{HELP}");

    let mut page = TerminalPage::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = prompt(&mut lines, "> ").await? {
        let event = match line.trim() {
            "" => continue,
            "login" => {
                if fill_form(&mut lines, &mut page, &[Field::Username, Field::Password])
                    .await?
                    .is_none()
                {
                    break;
                }
                Event::LoginSubmit
            }
            "logout" => Event::LogoutClick,
            "register" => {
                let fields = [Field::CustomerUsername, Field::CustomerPassword];
                if fill_form(&mut lines, &mut page, &fields).await?.is_none() {
                    break;
                }
                Event::RegisterCustomerSubmit
            }
            "ticket" => {
                let fields = [Field::TicketTitle, Field::TicketDescription];
                if fill_form(&mut lines, &mut page, &fields).await?.is_none() {
                    break;
                }
                Event::CreateTicketSubmit
            }
            "view" => {
                print_view(&page.view());
                continue;
            }
            command if command.split_whitespace().next() == Some("show") => {
                let id = command.split_whitespace().nth(1).unwrap_or_default();
                match describe_element(&page, id) {
                    Some(description) => println!("{description}"),
                    None => println!("unknown element: {id}"),
                }
                continue;
            }
            "help" => {
                println!("{HELP}");
                continue;
            }
            "quit" | "exit" => break,
            other => {
                println!("unknown command: {other} (try `help`)");
                continue;
            }
        };

        bridge.dispatch(event, &mut page).await;
        if event == Event::LoginSubmit {
            print_view(&page.view());
        }
    }

    if cli.metrics {
        print!("{}", render(&registry)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_url_override() {
        let cli = Cli::try_parse_from(["ticket-desk", "--url", "http://127.0.0.1:9000"]).unwrap();
        assert_eq!(cli.url.as_deref(), Some("http://127.0.0.1:9000"));
        assert!(!cli.json_logs);
        assert!(!cli.metrics);
    }

    #[test]
    fn test_cli_parses_metrics_flag() {
        let cli = Cli::try_parse_from(["ticket-desk", "--metrics"]).unwrap();
        assert!(cli.metrics);
        assert_eq!(cli.url, None);
    }

    #[test]
    fn test_describe_element_by_id() {
        let mut page = TerminalPage::new();
        page.fill(Field::Username, "alice".to_string());
        page.set_login_message("ok");
        page.set_section_visible(Section::Login, false);

        assert_eq!(describe_element(&page, "username").as_deref(), Some("username: alice"));
        assert_eq!(
            describe_element(&page, LOGIN_MESSAGE_ID).as_deref(),
            Some("login-message: ok")
        );
        assert_eq!(
            describe_element(&page, Section::Login.id()),
            Some(format!("{}: hidden", Section::Login.id()))
        );
        assert_eq!(describe_element(&page, "no-such-element"), None);
    }

    #[test]
    fn test_describe_element_masks_passwords() {
        let mut page = TerminalPage::new();
        page.fill(Field::Password, "s3cret".to_string());
        page.fill(Field::CustomerPassword, "pw".to_string());

        assert_eq!(
            describe_element(&page, Field::Password.id()).as_deref(),
            Some("password: ******")
        );
        let customer = describe_element(&page, Field::CustomerPassword.id()).unwrap();
        assert!(customer.ends_with(": **"));
        assert!(!customer.contains("pw"));
    }

    #[test]
    fn test_terminal_page_tracks_state() {
        let mut page = TerminalPage::new();
        page.fill(Field::Username, "alice".to_string());
        assert_eq!(page.field_value(Field::Username), "alice");

        page.set_section_visible(Section::Login, false);
        page.set_section_visible(Section::Logout, true);
        assert!(page.view().is_logged_in());

        page.reload();
        assert_eq!(page.view(), ViewState::initial());
        assert_eq!(page.field_value(Field::Username), "");
    }
}
