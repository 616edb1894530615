use argh::FromArgs;
use mish::{Identity, Interpreter, startup};
use std::io;
use std::process::ExitCode;

#[derive(FromArgs)]
/// A minimal interactive shell.
struct Args {
    #[argh(switch, short = 'v')]
    /// print version and license information, then start the shell.
    version: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args: Args = argh::from_env();

    let outcome = startup::start(Identity::resolve(), args.version, &mut io::stdout(), |session| {
        Interpreter::with_default_commands(session).repl()
    });
    ExitCode::from(startup::exit_status(outcome, &mut io::stderr()))
}
