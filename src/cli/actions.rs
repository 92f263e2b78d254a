
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    Signin {
        #[arg(short, long)]
        email: Option<String>,
    },

    Signup,

    Logout,

    Start {
        #[arg(short, long)]
        session: Option<i64>,

        #[arg(short, long)]
        topic: Option<String>,
    },

    Resume,

    List {
        #[arg(short, long)]
        detail: bool,
    },

    New {
        #[arg(short, long)]
        topic: Option<String>,
    },

    Switch {
        session_id: i64,
    },

    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    Show,

    SetApiUrl {
        url: String,
    },

    ToggleSuggestions,
}
