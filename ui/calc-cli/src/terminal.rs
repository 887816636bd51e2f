use std::io::Write;
use std::rc::Rc;

use async_trait::async_trait;
use calc_api_types::UserProfile;
use calc_client::{AuthForm, FormMode, FormView, ListView, Panel, ToastKind, Ui};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

/// Shared line reader so confirmations and the command loop read the same stdin.
pub struct Prompt {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl Prompt {
    pub fn stdin() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    /// `None` on end of input.
    pub async fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        let _ = std::io::stdout().flush();
        match self.lines.lock().await.next_line().await {
            Ok(line) => line,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read from stdin");
                None
            }
        }
    }
}

pub struct TerminalUi {
    prompt: Rc<Prompt>,
}

impl TerminalUi {
    pub fn new(prompt: Rc<Prompt>) -> Self {
        Self { prompt }
    }
}

#[async_trait(?Send)]
impl Ui for TerminalUi {
    fn show_panel(&self, panel: Panel) {
        match panel {
            Panel::Auth => println!("Not signed in."),
            Panel::App => println!("Type `help` for commands."),
        }
    }

    fn show_auth_form(&self, form: AuthForm) {
        match form {
            AuthForm::Login => println!("login <username> <password>"),
            AuthForm::Register => println!("register <username> <email> <password>"),
        }
    }

    fn show_welcome(&self, user: &UserProfile) {
        println!("Welcome, {}!", user.username);
    }

    fn show_toast(&self, message: &str, kind: ToastKind) {
        match kind {
            ToastKind::Error => eprintln!("[{}] {message}", kind.as_str()),
            _ => println!("[{}] {message}", kind.as_str()),
        }
    }

    fn render_form(&self, view: &FormView) {
        if let FormMode::Editing(id) = view.mode {
            let fields = &view.fields;
            println!(
                "{} #{id}: {} {} {}",
                view.title, fields.operand1, fields.operation, fields.operand2
            );
            println!("  `submit <operand1> <operation> <operand2>` to save, `cancel` to abort");
        }
    }

    fn render_list(&self, view: &ListView) {
        match view {
            ListView::Items(rows) => {
                for row in rows {
                    println!("#{:<5} {} = {}", row.id, row.expression, row.result);
                    println!("       {}", row.meta());
                }
            }
            other => {
                if let Some(message) = other.message() {
                    println!("{message}");
                }
            }
        }
    }

    fn reset_login_form(&self) {}

    fn reset_register_form(&self) {}

    async fn confirm(&self, message: &str) -> bool {
        let answer = self.prompt.read_line(&format!("{message} [y/N] ")).await;
        matches!(
            answer.as_deref().map(str::trim),
            Some("y" | "Y" | "yes" | "Yes" | "YES")
        )
    }
}
