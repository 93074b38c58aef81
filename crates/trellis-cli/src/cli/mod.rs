//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use trellis_core::{FocusContext, MenuDismissal, OverlayVisibility, config, logging};

mod commands;

#[derive(Parser)]
#[command(name = "trellis")]
#[command(version)]
#[command(about = "Overlay-dismissal coordinator with a terminal board")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    board_args: BoardArgs,
}

/// Arguments for the interactive board.
#[derive(clap::Args, Debug, Clone, Default)]
struct BoardArgs {
    /// Token for the profile API (enables the authenticated session)
    #[arg(long, env = "TRELLIS_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// Override the profile API base URL from config
    #[arg(long, value_name = "URL", global = true)]
    api_base: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the interactive board (default)
    Board,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Print which overlays a click or key press would close
    Decide(DecideArgs),
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Generate a fresh config from Rust defaults
    Generate,
}

#[derive(clap::Args, Debug, Clone, Default)]
struct DecideArgs {
    /// The modal is open
    #[arg(long)]
    modal: bool,
    /// The profile pop-over is open
    #[arg(long = "pop-over")]
    pop_over: bool,
    /// The boards menu is open
    #[arg(long)]
    menu: bool,
    /// The interaction started inside the modal
    #[arg(long = "focus-modal")]
    focus_modal: bool,
    /// The interaction started inside the pop-over
    #[arg(long = "focus-pop-over")]
    focus_pop_over: bool,
    /// The interaction started inside the boards menu
    #[arg(long = "focus-menu")]
    focus_menu: bool,
    /// Key code of a key press (a click when omitted; Escape is 27)
    #[arg(long, value_name = "CODE")]
    key: Option<u32>,
    /// Close the boards menu on clicks too
    #[arg(long = "menu-on-click")]
    menu_on_click: bool,
    /// Keep the boards menu open while focused
    #[arg(long = "menu-focus-aware")]
    menu_focus_aware: bool,
}

impl DecideArgs {
    /// Flags only enable behavior on top of the configured policy.
    fn options(&self, config: &config::Config) -> commands::decide::DecideOptions {
        let configured = config.dismissal.menu;
        let mut policy = config.dismissal;
        policy.menu = MenuDismissal {
            on_click: configured.on_click || self.menu_on_click,
            focus_aware: configured.focus_aware || self.menu_focus_aware,
        };

        commands::decide::DecideOptions {
            visibility: OverlayVisibility {
                pop_over_open: self.pop_over,
                modal_open: self.modal,
                boards_menu_open: self.menu,
            },
            focus: FocusContext {
                on_pop_over: self.focus_pop_over,
                on_modal: self.focus_modal,
                on_boards_menu: self.focus_menu,
            },
            key: self.key,
            policy,
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = config::Config::load().context("load config")?;
    let _log_guard =
        logging::init(&config.log, config.log_file().as_deref()).context("init logging")?;

    let Cli {
        command,
        board_args,
    } = cli;

    if let Some(api_base) = board_args.api_base {
        config.profile.api_base = api_base;
    }

    // default to the board
    let Some(command) = command else {
        return commands::board::run(&config, board_args.token.as_deref()).await;
    };

    match command {
        Commands::Board => commands::board::run(&config, board_args.token.as_deref()).await,

        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
        },

        Commands::Decide(args) => commands::decide::run(&args.options(&config)),
    }
}
