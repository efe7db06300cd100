use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::{Parser, Subcommand};

use taskflow::auth::{LoginRequest, RegisterRequest};
use taskflow::client::{render, ApiClient, ClientError, FileStore, Route, Session};
use taskflow::models::{normalize_due_date, ProjectInput, TaskInput};

#[derive(Parser, Debug)]
#[command(name = "taskflow-cli", about = "Terminal client for the TaskFlow API")]
struct Cli {
    /// Base URL of the TaskFlow server.
    #[arg(long, env = "TASKFLOW_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    /// Where the login session is kept. Defaults to ~/.taskflow/session.json.
    #[arg(long, env = "TASKFLOW_SESSION")]
    session: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
    /// Create an account and log in.
    Register {
        email: String,
        /// Prompted for when neither the flag nor the variable is set.
        #[arg(long, env = "TASKFLOW_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },
    Login {
        email: String,
        #[arg(long, env = "TASKFLOW_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored token.
    Logout,
    Whoami,
    /// Show the screen at a client path such as `/projects/3/tasks`.
    Open {
        path: String,
    },
    #[command(subcommand)]
    Projects(ProjectCommands),
    #[command(subcommand)]
    Tasks(TaskCommands),
}

#[derive(Debug, Clone, Subcommand)]
enum ProjectCommands {
    List,
    Show {
        id: i32,
    },
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    Update {
        id: i32,
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        id: i32,
    },
}

#[derive(Debug, Clone, Subcommand)]
enum TaskCommands {
    List {
        project_id: i32,
    },
    Show {
        project_id: i32,
        id: i32,
    },
    Create {
        project_id: i32,
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// `YYYY-MM-DD`, a naive date-time or RFC 3339.
        #[arg(long)]
        due: Option<String>,
    },
    Update {
        project_id: i32,
        id: i32,
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        due: Option<String>,
    },
    Toggle {
        project_id: i32,
        id: i32,
    },
    Delete {
        project_id: i32,
        id: i32,
    },
}

fn default_session_path() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".taskflow").join("session.json"),
        None => PathBuf::from(".taskflow-session.json"),
    }
}

/// The screen a command belongs to; `None` for purely local commands.
fn route_for(command: &Commands) -> Option<Route> {
    match command {
        Commands::Register { .. } => Some(Route::Register),
        Commands::Login { .. } => Some(Route::Login),
        Commands::Logout | Commands::Whoami => None,
        Commands::Open { path } => Some(Route::parse(path)),
        Commands::Projects(_) => Some(Route::Projects),
        Commands::Tasks(command) => Some(Route::Tasks {
            project_id: command.project_id(),
        }),
    }
}

impl TaskCommands {
    fn project_id(&self) -> i32 {
        match self {
            TaskCommands::List { project_id }
            | TaskCommands::Show { project_id, .. }
            | TaskCommands::Create { project_id, .. }
            | TaskCommands::Update { project_id, .. }
            | TaskCommands::Toggle { project_id, .. }
            | TaskCommands::Delete { project_id, .. } => *project_id,
        }
    }
}

fn read_password(given: Option<String>) -> io::Result<String> {
    if let Some(password) = given {
        return Ok(password);
    }
    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn task_input(
    title: String,
    description: Option<String>,
    due: Option<String>,
) -> Result<TaskInput, Box<dyn std::error::Error>> {
    let due_date = match due.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(normalize_due_date(raw)?),
    };
    Ok(TaskInput {
        title,
        description,
        due_date,
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::new(cli.session.clone().unwrap_or_else(default_session_path));
    let mut session = Session::load(store)?;
    let route = match route_for(&cli.command) {
        Some(route) => Some(route.authorize(session.is_authenticated()).map_err(|e| {
            eprintln!("{} needs a login, redirecting to {}", route, Route::Login);
            e
        })?),
        None => None,
    };
    let api = ApiClient::new(&cli.api_url).with_token(session.token().map(str::to_string));

    match cli.command {
        Commands::Register {
            email,
            password,
            first_name,
            last_name,
        } => {
            let response = api
                .register(&RegisterRequest {
                    email,
                    password: read_password(password)?,
                    first_name,
                    last_name,
                })
                .await?;
            session.save(&response)?;
            if let Some(identity) = session.identity() {
                println!("{}", render::greeting(identity));
            }
        }
        Commands::Login { email, password } => {
            let response = api
                .login(&LoginRequest {
                    email,
                    password: read_password(password)?,
                })
                .await?;
            session.save(&response)?;
            if let Some(identity) = session.identity() {
                println!("{}", render::greeting(identity));
            }
        }
        Commands::Logout => {
            session.clear()?;
            println!("Logged out.");
        }
        Commands::Whoami => match session.identity() {
            Some(identity) => println!(
                "{} (session expires {})",
                render::display_name(identity),
                identity.expires_at.format("%Y-%m-%d %H:%M UTC")
            ),
            None => return Err(ClientError::NotLoggedIn.into()),
        },
        Commands::Open { .. } => match route {
            Some(Route::Projects) => run_projects(&api, ProjectCommands::List).await?,
            Some(Route::Tasks { project_id }) => {
                run_tasks(&api, TaskCommands::List { project_id }).await?
            }
            Some(Route::Register) => println!("Run `taskflow-cli register <email>`."),
            _ => println!("Run `taskflow-cli login <email>`."),
        },
        Commands::Projects(command) => run_projects(&api, command).await?,
        Commands::Tasks(command) => run_tasks(&api, command).await?,
    }

    Ok(())
}

async fn run_projects(
    api: &ApiClient,
    command: ProjectCommands,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        ProjectCommands::List => print!("{}", render::project_list(&api.list_projects().await?)),
        ProjectCommands::Show { id } => {
            println!("{}", render::project_line(&api.get_project(id).await?))
        }
        ProjectCommands::Create { name, description } => {
            let project = api
                .create_project(&ProjectInput { name, description })
                .await?;
            println!("Created {}", render::project_line(&project));
        }
        ProjectCommands::Update {
            id,
            name,
            description,
        } => {
            let project = api
                .update_project(id, &ProjectInput { name, description })
                .await?;
            println!("Updated {}", render::project_line(&project));
        }
        ProjectCommands::Delete { id } => {
            api.delete_project(id).await?;
            println!("Deleted project {} and its tasks.", id);
        }
    }
    Ok(())
}

async fn run_tasks(api: &ApiClient, command: TaskCommands) -> Result<(), Box<dyn std::error::Error>> {
    let now = Utc::now();
    match command {
        TaskCommands::List { project_id } => {
            print!("{}", render::task_list(&api.list_tasks(project_id).await?, now))
        }
        TaskCommands::Show { project_id, id } => {
            let task = api.get_task(project_id, id).await?;
            println!("{}", render::task_line(&task, now));
            if let Some(description) = task.description.as_deref() {
                println!("    {}", description);
            }
        }
        TaskCommands::Create {
            project_id,
            title,
            description,
            due,
        } => {
            let task = api
                .create_task(project_id, &task_input(title, description, due)?)
                .await?;
            println!("Created {}", render::task_line(&task, now));
        }
        TaskCommands::Update {
            project_id,
            id,
            title,
            description,
            due,
        } => {
            let task = api
                .update_task(project_id, id, &task_input(title, description, due)?)
                .await?;
            println!("Updated {}", render::task_line(&task, now));
        }
        TaskCommands::Toggle { project_id, id } => {
            let task = api.toggle_task(project_id, id).await?;
            println!("{}", render::task_line(&task, now));
        }
        TaskCommands::Delete { project_id, id } => {
            api.delete_task(project_id, id).await?;
            println!("Deleted task {}.", id);
        }
    }
    Ok(())
}
