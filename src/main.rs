use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use dotenv::dotenv;
use hello_genai::completions::CompletionClient;
use hello_genai::display::render_view;
use hello_genai::reviews::{ProductFilter, ReviewSession};
use hello_genai::{ApiKey, AppConfig, CompletionResult, OpenAiClient, PromptRequest};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const DEFAULT_PROMPT: &str = "Explain generative AI in one sentence.";
const DEFAULT_ROW_LIMIT: usize = 20;

/// Hello, GenAI! Prompt a chat model and explore customer reviews.
#[derive(Parser, Debug)]
#[command(name = "hello-genai", version, about)]
struct Cli {
    /// Review dataset to ingest
    #[arg(long, env = "HELLO_GENAI_DATASET", default_value = hello_genai::config::DEFAULT_DATASET_PATH)]
    dataset: PathBuf,

    /// Chat model identifier
    #[arg(long, env = "HELLO_GENAI_MODEL", default_value = hello_genai::provider::DEFAULT_MODEL)]
    model: String,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = hello_genai::provider::API_BASE)]
    base_url: String,

    /// Initial temperature (0.0 to 1.0)
    #[arg(long, default_value_t = 0.7)]
    temperature: f32,

    /// Seconds to keep identical answers; 0 disables the cache
    #[arg(long, default_value_t = 300)]
    cache_ttl_secs: u64,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// Answer one prompt and exit instead of starting the interactive session
    #[arg(long)]
    prompt: Option<String>,
}

impl Cli {
    fn into_config(self) -> (AppConfig, Option<String>) {
        let config = AppConfig {
            base_url: self.base_url,
            model: self.model,
            default_temperature: snap_temperature(self.temperature),
            dataset_path: self.dataset,
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
            request_timeout: Duration::from_secs(self.timeout_secs),
            ..AppConfig::default()
        }
        .with_api_key(ApiKey::Default);
        (config, self.prompt)
    }
}

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Ingest,
    Parse,
    Ask(Option<String>),
    AskFresh(Option<String>),
    Temperature(Option<f32>),
    Products,
    Filter(ProductFilter),
    Show(Option<usize>),
    ClearCache,
    Status,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let rest_opt = (!rest.is_empty()).then(|| rest.to_string());

        Some(match word.to_ascii_lowercase().as_str() {
            "help" | "?" => Command::Help,
            "ingest" | "load" => Command::Ingest,
            "parse" | "clean" => Command::Parse,
            "ask" | "prompt" => Command::Ask(rest_opt),
            "fresh" => Command::AskFresh(rest_opt),
            "temp" | "temperature" => match rest_opt {
                None => Command::Temperature(None),
                Some(raw) => match raw.parse::<f32>() {
                    Ok(value) if value.is_finite() => Command::Temperature(Some(value)),
                    _ => Command::Unknown(line.to_string()),
                },
            },
            "products" => Command::Products,
            "filter" => Command::Filter(ProductFilter::from_selection(rest)),
            "show" => match rest_opt {
                None => Command::Show(None),
                Some(raw) => match raw.parse::<usize>() {
                    Ok(limit) => Command::Show(Some(limit)),
                    Err(_) => Command::Unknown(line.to_string()),
                },
            },
            "clear-cache" => Command::ClearCache,
            "status" => Command::Status,
            "quit" | "exit" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        })
    }
}

/// Round to the slider's 0.01 step and keep within `[0.0, 1.0]`.
fn snap_temperature(value: f32) -> f32 {
    ((value * 100.0).round() / 100.0).clamp(0.0, 1.0)
}

struct App {
    config: AppConfig,
    client: CompletionClient<OpenAiClient>,
    session: ReviewSession,
    temperature: f32,
    filter: ProductFilter,
    last_prompt: String,
}

impl App {
    fn new(config: AppConfig) -> Result<Self, hello_genai::LlmError> {
        if config.api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY is not set; completions will fail");
        }
        Ok(Self {
            client: config.completion_client()?,
            session: config.review_session(),
            temperature: config.default_temperature,
            filter: ProductFilter::All,
            last_prompt: DEFAULT_PROMPT.to_string(),
            config,
        })
    }

    /// Run one command. Returns `false` when the user wants to leave.
    async fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Help => print_help(),
            Command::Ingest => match self.session.ingest(&self.config.dataset_path) {
                Ok(count) => println!("Dataset loaded successfully! ({count} reviews)"),
                Err(e) => eprintln!("Error: {e}"),
            },
            Command::Parse => match self.session.clean() {
                Ok(count) => println!("Reviews parsed and cleaned! ({count} reviews)"),
                Err(e) => eprintln!("Warning: {e}"),
            },
            Command::Ask(prompt) => {
                self.ask(prompt, false).await;
            }
            Command::AskFresh(prompt) => {
                self.ask(prompt, true).await;
            }
            Command::Temperature(None) => println!("Model temperature: {:.2}", self.temperature),
            Command::Temperature(Some(value)) => {
                self.temperature = snap_temperature(value);
                println!("Model temperature: {:.2}", self.temperature);
            }
            Command::Products => match self.session.filter_options() {
                Ok(options) => {
                    for option in options {
                        println!("  {option}");
                    }
                }
                Err(e) => eprintln!("Warning: {e}"),
            },
            Command::Filter(filter) => {
                self.filter = filter;
                self.show(Some(DEFAULT_ROW_LIMIT));
            }
            Command::Show(limit) => self.show(limit.or(Some(DEFAULT_ROW_LIMIT))),
            Command::ClearCache => {
                self.client.clear_cache();
                println!("Response cache cleared.");
            }
            Command::Status => {
                println!("Model: {}", self.config.model);
                println!("Temperature: {:.2}", self.temperature);
                println!("Dataset: {}", self.config.dataset_path.display());
                println!("Session: {}", self.session.state().name());
                println!("Filter: {}", self.filter);
                println!("Cached answers: {}", self.client.cached_entries());
            }
            Command::Quit => return false,
            Command::Unknown(line) => eprintln!("Unknown command: {line} (try `help`)"),
        }
        true
    }

    /// Prompt the model and print the outcome. Returns whether an answer came back.
    async fn ask(&mut self, prompt: Option<String>, fresh: bool) -> bool {
        if let Some(prompt) = prompt {
            self.last_prompt = prompt;
        }
        let request = match PromptRequest::new(self.last_prompt.clone(), self.temperature) {
            Ok(request) => request,
            Err(e) => {
                eprintln!("Error: {e}");
                return false;
            }
        };

        println!("AI is working...");
        let result = if fresh {
            self.client.complete_fresh(&request).await
        } else {
            self.client.complete(&request).await
        };
        print_completion(&result);
        result.is_success()
    }

    fn show(&self, limit: Option<usize>) {
        match self.session.view(&self.filter) {
            Ok(view) => print!("{}", render_view(&view, limit)),
            Err(e) => eprintln!("Warning: {e}"),
        }
    }
}

fn print_completion(result: &CompletionResult) {
    match result {
        CompletionResult::Success { text } => println!("AI Response:\n{text}"),
        CompletionResult::Failure { error } => eprintln!("Error: {error}"),
    }
}

fn print_help() {
    println!(
        "Commands:
  ask [prompt]        get an AI response (repeats the last prompt if none given)
  fresh [prompt]      same as ask, but skip cached answers
  temp [value]        show or set the model temperature (0.0 to 1.0)
  ingest              load the review dataset
  parse               clean review summaries
  products            list product filter choices
  filter <product>    filter reviews by product (`all` for every product)
  show [rows]         show the filtered reviews and sentiment histogram
  clear-cache         forget cached AI responses
  status              show current settings
  quit                leave"
    );
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    dotenv().ok();
    init_tracing();

    let (config, one_shot) = Cli::parse().into_config();
    let mut app = App::new(config)?;

    if let Some(prompt) = one_shot {
        let answered = app.ask(Some(prompt), false).await;
        return Ok(if answered {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    println!("Hello, GenAI!");
    println!("This is your GenAI-powered data processing app. Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let Some(command) = Command::parse(&line) else {
            continue;
        };
        if !app.handle(command).await {
            break;
        }
    }

    Ok(ExitCode::SUCCESS)
}
