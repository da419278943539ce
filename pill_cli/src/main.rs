use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::Parser;
use pill_core::{
    config::ReconcileConfig,
    engine::Engine,
    event::{Action, InputEvent},
    model::{Pill, SearchState},
    session::Session,
};
use pill_directory::TsvDirectory;
use pill_query::QueryTokenizer;

/// 搜索 pill 演示 CLI：输入搜索串，查看 pill、搜索框文本与规范搜索串。
#[derive(Debug, Parser)]
#[command(name = "pill_cli", version)]
struct Cli {
    /// 用户/频道/消息目录（TSV）
    #[arg(long)]
    directory: Option<PathBuf>,
    /// reconcile 配置（TOML）
    #[arg(long)]
    config: Option<PathBuf>,
    /// 以 JSON 输出每次的状态
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let directory_path = cli.directory.clone().unwrap_or_else(default_directory_path);
    let directory = TsvDirectory::from_path(&directory_path)
        .with_context(|| format!("loading directory {}", directory_path.display()))?;
    let config = match &cli.config {
        Some(path) => {
            let s = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            ReconcileConfig::from_toml_str(&s)?
        }
        None => ReconcileConfig::default(),
    };
    tracing::info!("directory: {}", directory_path.display());

    let engine = Engine::new(directory, QueryTokenizer::new()).with_config(config);
    let mut session = Session::new(engine);
    tracing::debug!("reconcile config: {:?}", session.engine().config());
    repl(&mut session, &directory_path, cli.json)
}

fn default_directory_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("asset")
        .join("directory.tsv")
}

fn repl(
    session: &mut Session<TsvDirectory, QueryTokenizer>,
    directory_path: &PathBuf,
    json: bool,
) -> anyhow::Result<()> {
    let mut out = io::stdout();
    let mut line = String::new();
    writeln!(out, "search pills demo | directory: {}", directory_path.display())?;
    writeln!(
        out,
        "直接输入搜索串并回车载入；:text <s> 设置文本，:enter 转 pill，:bs 退格，:clear 清空，:submit 提交，:q 退出。"
    )?;
    out.flush()?;

    loop {
        line.clear();
        print!("search>");
        out.flush()?;
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim_end_matches(['\r', '\n']);
        if input.trim().is_empty() {
            continue;
        }
        let Some(event) = parse_command(input) else {
            break;
        };

        let (state, actions) = session.handle(event)?;
        for action in &actions {
            match action {
                Action::Search(s) => writeln!(out, "search: {s}")?,
                Action::Shake => writeln!(out, "(shake: 有不合法的条件)")?,
            }
        }
        if json {
            writeln!(out, "{}", serde_json::to_string_pretty(&state)?)?;
        } else {
            print_state(&mut out, &state)?;
        }
    }

    Ok(())
}

/// `None` 表示退出。
fn parse_command(input: &str) -> Option<InputEvent> {
    let event = match input.trim() {
        ":q" | ":quit" | ":exit" => return None,
        ":enter" => InputEvent::Enter,
        ":bs" => InputEvent::Backspace,
        ":clear" => InputEvent::Clear,
        ":submit" => InputEvent::Submit,
        _ => match input
            .trim_start()
            .strip_prefix(":text")
            .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
        {
            Some(rest) => InputEvent::Text(rest.trim_start().to_string()),
            None => InputEvent::Load(input.trim().to_string()),
        },
    };
    Some(event)
}

fn print_state(out: &mut impl Write, state: &SearchState) -> io::Result<()> {
    writeln!(out, "--------------------")?;
    for (i, pill) in state.pills.iter().enumerate() {
        let n = i + 1;
        match pill {
            Pill::Search(p) => writeln!(out, "{n}. [{}]\t({})", p.display_value, p.description_html)?,
            Pill::User(p) => {
                let names: Vec<String> = p
                    .users
                    .iter()
                    .map(|u| {
                        let mut name = u.display_value.clone();
                        if let Some(status) = &u.status_emoji_info {
                            name.push_str(&format!(" :{}:", status.emoji_name));
                        }
                        if u.should_add_guest_user_indicator {
                            name.push_str(" (guest)");
                        }
                        if u.deactivated {
                            name.push_str(" (deactivated)");
                        }
                        name
                    })
                    .collect();
                writeln!(out, "{n}. [{}]\t{}", p.display_value, names.join(", "))?
            }
        }
    }
    writeln!(out, "text: {:?}", state.text)?;
    writeln!(out, "search string: {}", state.search_string)?;
    Ok(())
}
