use chat_archive::{config, generate, naming, output, reader};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chat-archive")]
#[command(about = "Static HTML archive for chat exports")]
#[command(long_about = "\
Static HTML archive for chat exports

Reads a JSON export of streams, topics, and messages and writes a static
site: an index of streams, one page per stream, one page per topic.

Input structure:

  json/
  ├── stream_info.json             # Every stream with id and topic metadata
  ├── 1-general/                   # One directory per stream (sanitized name)
  │   ├── welcome.json             # Messages of topic \"welcome\"
  │   └── a.2Fb.json               # Messages of topic \"a/b\"
  └── 7-social/
      └── lunch.json

Site root (--site-root):

  config.toml                      # Site URL, title, chat server URL, framing
  style.css                        # Optional; a default is used otherwise
  assets/                          # Optional; copied to the output root
  .nojekyll                        # Optional; created empty otherwise

Run 'chat-archive gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Root of the JSON export
    #[arg(long, default_value = "json", global = true)]
    input: PathBuf,

    /// Output directory
    #[arg(long, default_value = "site", global = true)]
    output: PathBuf,

    /// Directory holding config.toml, style.css, assets/ and .nojekyll
    #[arg(long, default_value = ".", global = true)]
    site_root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the full archive site (always a full rebuild)
    Build,
    /// Validate config and export without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let settings = config::load_config(&cli.site_root)?;
            let build_config = generate::BuildConfig {
                input_root: cli.input.clone(),
                output_root: cli.output.clone(),
                site_root: cli.site_root.clone(),
                settings,
                generated_at: chrono::Utc::now(),
            };

            println!(
                "==> Building {} \u{2192} {}",
                cli.input.display(),
                cli.output.display()
            );
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_build_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = generate::build_website(&build_config, Some(tx));
            // The sender is dropped by now, so the printer drains and exits.
            if printer.join().is_err() {
                eprintln!("progress printer panicked");
            }
            let report = result?;

            println!("{}", output::format_build_summary(&report));
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            config::load_config(&cli.site_root)?;
            println!("==> Checking {}", cli.input.display());
            let info = reader::read_stream_info(&cli.input)?;
            naming::check_collisions(&info.streams)?;
            output::print_check_output(&info);
            println!("==> Export is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
