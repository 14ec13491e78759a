use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use records::RecordsError;
use records::analysis::{
    AnalysisRecord, AssignAnalystRequest, CanMerge, ChunkDetail, MergeResponse, ProofValidationRequest, Threshold,
    Verdict, VerdictChange, verdict_endpoint,
};
use records::auth::{LoginReply, LoginRequest, validate_login};
use records::endpoints;
use records::media::{UrlPredictionRequest, validate_image};
use records::runs::{
    DEFAULT_EXPECTED_SCORE, RegressionReady, RegressionRunRequest, StartOutcome, StartProcessReply,
    StartProcessRequest,
};
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing token; run `login` and pass --token or set TESTBENCH_TOKEN")]
    MissingToken,
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("{0}")]
    Records(#[from] RecordsError),
    #[error("unknown verdict `{0}`; expected Bug, \"Not Bug\", Outlier or none")]
    UnknownVerdict(String),
    #[error("{0}")]
    Rejected(String),
    #[error("file error on {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "testbench-cli", about = "Model testbench REST CLI")]
struct Cli {
    #[arg(long, env = "TESTBENCH_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "TESTBENCH_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the host is up.
    Ping,
    /// Exchange credentials for a bearer token.
    Login {
        #[arg(long)]
        emp_id: String,
        #[arg(long, env = "TESTBENCH_PASSWORD")]
        password: String,
    },
    /// List models.
    Models,
    /// List versions of one model.
    Versions { model: String },
    LoadTest(LoadTestCommand),
    Regression(RegressionCommand),
    Chunks(ChunksCommand),
    Verdict(VerdictCommand),
    /// Submit proof validation for a Bug record.
    Validate(ValidateArgs),
    Merge(MergeCommand),
    /// List expected-class options for a model.
    Classes { model: String },
    /// Show the review threshold.
    Threshold,
    Predict(PredictCommand),
    /// Upload an image and print its hosted URL.
    ImageUrl { path: PathBuf },
}

#[derive(Args, Debug)]
struct LoadTestCommand {
    #[command(subcommand)]
    command: LoadTestSubcommand,
}

#[derive(Subcommand, Debug)]
enum LoadTestSubcommand {
    Start {
        #[arg(long)]
        model: String,
        #[arg(long)]
        version: String,
        #[arg(long = "recipient")]
        recipients: Vec<String>,
        #[arg(long, default_value = DEFAULT_EXPECTED_SCORE)]
        expected_score: String,
    },
}

#[derive(Args, Debug)]
struct RegressionCommand {
    #[command(subcommand)]
    command: RegressionSubcommand,
}

#[derive(Subcommand, Debug)]
enum RegressionSubcommand {
    Ready,
    Run {
        #[arg(long)]
        model: String,
        #[arg(long)]
        version: String,
    },
}

#[derive(Args, Debug)]
struct ChunksCommand {
    #[command(subcommand)]
    command: ChunksSubcommand,
}

#[derive(Subcommand, Debug)]
enum ChunksSubcommand {
    List,
    Show {
        chunk: String,
        /// Narrow the reply to one record.
        #[arg(long)]
        url: Option<String>,
    },
    /// Write a chunk's records as CSV.
    Export {
        chunk: String,
        #[arg(long, help = "Output file, or stdout when omitted")]
        output: Option<PathBuf>,
    },
    Assign { chunk: String, analyst: String },
}

#[derive(Args, Debug)]
struct VerdictCommand {
    #[command(subcommand)]
    command: VerdictSubcommand,
}

#[derive(Subcommand, Debug)]
enum VerdictSubcommand {
    Set {
        chunk: String,
        url: String,
        /// Bug, "Not Bug", Outlier, or none to clear.
        verdict: String,
    },
}

#[derive(Args, Debug)]
struct ValidateArgs {
    chunk: String,
    url: String,
    #[arg(long = "expected-class", required = true)]
    expected_classes: Vec<String>,
    #[arg(long = "reproduced-url")]
    reproduced_urls: Vec<String>,
    #[arg(long, default_value = "")]
    analysed_by: String,
}

#[derive(Args, Debug)]
struct MergeCommand {
    #[command(subcommand)]
    command: MergeSubcommand,
}

#[derive(Subcommand, Debug)]
enum MergeSubcommand {
    Status,
    Run,
}

#[derive(Args, Debug)]
struct PredictCommand {
    #[command(subcommand)]
    command: PredictSubcommand,
}

#[derive(Subcommand, Debug)]
enum PredictSubcommand {
    Url {
        #[arg(long)]
        model: String,
        #[arg(long)]
        version: String,
        url: String,
    },
    File {
        #[arg(long)]
        model: String,
        #[arg(long)]
        version: String,
        path: PathBuf,
    },
}

/// Authenticated handle on the backend REST surface.
struct Backend {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl Backend {
    fn new(base_url: &str, token: Option<String>) -> Result<Self, CliError> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: normalize_base_url(base_url)?,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> Result<reqwest::RequestBuilder, CliError> {
        let token = self.token.as_deref().ok_or(CliError::MissingToken)?;
        Ok(self
            .http
            .request(method, format!("{}{path}", self.base_url))
            .bearer_auth(token))
    }

    async fn get(&self, path: &str) -> Result<Value, CliError> {
        let response = self.request(reqwest::Method::GET, path)?.send().await?;
        read_json(response).await
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, CliError> {
        let response = self.request(reqwest::Method::POST, path)?.json(body).send().await?;
        read_json(response).await
    }

    /// Send without judging the status.
    async fn exchange<B: Serialize>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(u16, Value), CliError> {
        let request = self.request(method, path)?;
        let request = match body {
            Some(body) => request.json(body),
            None => request,
        };
        let response = request.send().await?;
        let status = response.status().as_u16();
        Ok((status, response.json::<Value>().await.unwrap_or(Value::Null)))
    }

    async fn post_form(&self, path: &str, form: Form) -> Result<Value, CliError> {
        let response = self.request(reqwest::Method::POST, path)?.multipart(form).send().await?;
        read_json(response).await
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let backend = Backend::new(&cli.base_url, cli.token)?;

    match cli.command {
        Command::Ping => run_ping(&backend).await,
        Command::Login { emp_id, password } => run_login(&backend, &emp_id, &password).await,
        Command::Models => print_json(&backend.get(endpoints::ALL_MODELS).await?),
        Command::Versions { model } => print_json(&backend.get(&endpoints::all_versions(&model)).await?),
        Command::LoadTest(command) => run_load_test(&backend, command).await,
        Command::Regression(command) => run_regression(&backend, command).await,
        Command::Chunks(command) => run_chunks(&backend, command).await,
        Command::Verdict(command) => run_verdict(&backend, command).await,
        Command::Validate(args) => run_validate(&backend, args).await,
        Command::Merge(command) => run_merge(&backend, command).await,
        Command::Classes { model } => print_json(&backend.get(&endpoints::model_classes(&model)).await?),
        Command::Threshold => {
            let threshold: Threshold = serde_json::from_value(backend.get(endpoints::GET_THRESHOLD).await?)?;
            println!("{}", threshold.value());
            Ok(())
        }
        Command::Predict(command) => run_predict(&backend, command).await,
        Command::ImageUrl { path } => {
            let form = Form::new().part("image", image_part(&path).await?);
            print_json(&backend.post_form(endpoints::GENERATE_IMAGE_URL, form).await?)
        }
    }
}

async fn run_ping(backend: &Backend) -> Result<(), CliError> {
    let url = format!("{}/healthz", backend.base_url);
    let response = backend.http.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Server { status: status.as_u16(), message: "health check failed".to_owned() });
    }
    println!("ok");
    Ok(())
}

async fn run_login(backend: &Backend, emp_id: &str, password: &str) -> Result<(), CliError> {
    let request: LoginRequest = validate_login(emp_id, password)?;
    let response = backend
        .http
        .post(format!("{}{}", backend.base_url, endpoints::LOGIN))
        .json(&request)
        .send()
        .await?;
    let reply: LoginReply = serde_json::from_value(read_json(response).await?)?;
    let token = reply
        .token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| CliError::Rejected("login response did not include a token".to_owned()))?;
    println!("{token}");
    Ok(())
}

async fn run_load_test(backend: &Backend, command: LoadTestCommand) -> Result<(), CliError> {
    match command.command {
        LoadTestSubcommand::Start { model, version, recipients, expected_score } => {
            let request = StartProcessRequest::build(Some(&model), Some(&version), &recipients, &expected_score)?;
            let (status, body) = backend
                .exchange(reqwest::Method::POST, endpoints::START_PROCESS, Some(&request))
                .await?;
            let reply: StartProcessReply = serde_json::from_value(body).unwrap_or_default();
            match StartOutcome::from_status(status, &reply) {
                StartOutcome::Started(message) => {
                    println!("{message}");
                    Ok(())
                }
                StartOutcome::LoginRequired => Err(CliError::MissingToken),
                StartOutcome::Rejected(messages) => Err(CliError::Rejected(messages.join("; "))),
                StartOutcome::Failed(message) => Err(CliError::Server { status, message }),
            }
        }
    }
}

async fn run_regression(backend: &Backend, command: RegressionCommand) -> Result<(), CliError> {
    match command.command {
        RegressionSubcommand::Ready => {
            let reply: RegressionReady = serde_json::from_value(backend.get(endpoints::REGRESSION_READY).await?)?;
            println!("{}", reply.ready);
            Ok(())
        }
        RegressionSubcommand::Run { model, version } => {
            let request = RegressionRunRequest::build(Some(&model), Some(&version))?;
            print_json(&backend.post(endpoints::REGRESSION_RUN, &request).await?)
        }
    }
}

async fn fetch_chunk(backend: &Backend, chunk: &str, url: Option<&str>) -> Result<ChunkDetail, CliError> {
    let path = endpoints::chunk(chunk, url)?;
    Ok(serde_json::from_value(backend.get(&path).await?)?)
}

async fn run_chunks(backend: &Backend, command: ChunksCommand) -> Result<(), CliError> {
    match command.command {
        ChunksSubcommand::List => print_json(&backend.get(endpoints::GET_CHUNKS).await?),
        ChunksSubcommand::Show { chunk, url } => {
            let path = endpoints::chunk(&chunk, url.as_deref())?;
            print_json(&backend.get(&path).await?)
        }
        ChunksSubcommand::Export { chunk, output } => {
            let detail = fetch_chunk(backend, &chunk, None).await?;
            let csv = records::csv::export_records(&detail.data)?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, csv)
                        .await
                        .map_err(|source| CliError::Io { path: path.clone(), source })?;
                    eprintln!("exported {} records to {}", detail.data.len(), path.display());
                }
                None => print!("{csv}"),
            }
            Ok(())
        }
        ChunksSubcommand::Assign { chunk, analyst } => {
            let request = AssignAnalystRequest { analyst, chunk };
            print_json(&backend.post(endpoints::SET_ANALYST, &request).await?)
        }
    }
}

async fn run_verdict(backend: &Backend, command: VerdictCommand) -> Result<(), CliError> {
    match command.command {
        VerdictSubcommand::Set { chunk, url, verdict } => {
            let next = parse_verdict(&verdict)?;
            let change = VerdictChange { chunk, input_media_url: url };
            print_json(&backend.post(verdict_endpoint(next), &change).await?)
        }
    }
}

async fn run_validate(backend: &Backend, args: ValidateArgs) -> Result<(), CliError> {
    let record = AnalysisRecord {
        input_media_url: args.url,
        analysis: Some(Verdict::Bug),
        expected_classes: args.expected_classes,
        reproduced_urls: args.reproduced_urls,
        analysed_by: args.analysed_by,
        ..AnalysisRecord::default()
    };
    let request = ProofValidationRequest::from_record(Some(&args.chunk), &record)?;
    print_json(&backend.post(endpoints::PROOF_VALIDATION, &request).await?)
}

async fn run_merge(backend: &Backend, command: MergeCommand) -> Result<(), CliError> {
    match command.command {
        MergeSubcommand::Status => {
            let reply: CanMerge = serde_json::from_value(backend.get(endpoints::CAN_MERGE).await?)?;
            println!("{}", reply.can_merge);
            Ok(())
        }
        MergeSubcommand::Run => {
            let (status, body) = backend
                .exchange::<()>(reqwest::Method::GET, endpoints::MERGE, None)
                .await?;
            let reply: MergeResponse = serde_json::from_value(body).unwrap_or_default();
            if reply.is_success() {
                println!("{}", reply.message.unwrap_or_default());
                Ok(())
            } else {
                Err(CliError::Server { status, message: reply.failure_message() })
            }
        }
    }
}

async fn run_predict(backend: &Backend, command: PredictCommand) -> Result<(), CliError> {
    match command.command {
        PredictSubcommand::Url { model, version, url } => {
            let request = UrlPredictionRequest::build(Some(&model), Some(&version), &url)?;
            print_json(&backend.post(endpoints::PREDICT_URL, &request).await?)
        }
        PredictSubcommand::File { model, version, path } => {
            let form = Form::new()
                .part("image", image_part(&path).await?)
                .text("model", model)
                .text("version", version);
            print_json(&backend.post_form(endpoints::PREDICT_FILE, form).await?)
        }
    }
}

/// Validated multipart part for an image on disk.
async fn image_part(path: &Path) -> Result<Part, CliError> {
    let io_error = |source| CliError::Io { path: path.to_path_buf(), source };
    let size = tokio::fs::metadata(path).await.map_err(io_error)?.len();
    let name = file_name(path);
    validate_image(&name, size)?;
    let bytes = tokio::fs::read(path).await.map_err(io_error)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Ok(Part::bytes(bytes).file_name(name).mime_str(mime.as_ref())?)
}

async fn read_json(response: reqwest::Response) -> Result<Value, CliError> {
    let status = response.status();
    let value = response.json::<Value>().await.unwrap_or(Value::Null);
    if !status.is_success() {
        return Err(CliError::Server {
            status: status.as_u16(),
            message: server_message(&value, status.canonical_reason().unwrap_or("request failed")),
        });
    }
    Ok(value)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

fn normalize_base_url(base_url: &str) -> Result<String, CliError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_owned())
    } else {
        Err(CliError::InvalidBaseUrl(base_url.to_owned()))
    }
}

/// Verdict argument; `none` clears the verdict.
fn parse_verdict(raw: &str) -> Result<Option<Verdict>, CliError> {
    let normalized = raw.trim().to_ascii_lowercase().replace(['-', '_'], " ");
    match normalized.as_str() {
        "none" | "unset" => Ok(None),
        "bug" => Ok(Some(Verdict::Bug)),
        "not bug" | "notbug" => Ok(Some(Verdict::NotBug)),
        "outlier" => Ok(Some(Verdict::Outlier)),
        _ => Err(CliError::UnknownVerdict(raw.to_owned())),
    }
}

/// First non-blank `message`/`error` in an error body.
fn server_message(body: &Value, fallback: &str) -> String {
    ["message", "error"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map_or_else(|| fallback.to_owned(), ToOwned::to_owned)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
