use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    value_parser, Arg, ArgAction, ColorChoice, Command,
};

fn id_arg() -> Arg {
    Arg::new("id")
        .help("Todo identifier")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn title_arg() -> Arg {
    Arg::new("title").help("Todo title").required(true)
}

fn completed_arg() -> Arg {
    Arg::new("completed")
        .long("completed")
        .short('c')
        .help("Mark the todo as completed")
        .action(ArgAction::SetTrue)
}

fn username_arg() -> Arg {
    Arg::new("username")
        .short('u')
        .long("username")
        .help("Account username")
}

fn password_arg() -> Arg {
    Arg::new("password")
        .short('p')
        .long("password")
        .help("Account password (prompted when omitted)")
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("remote-entity")
        .about("Bearer-session auth client and SOAP todo client")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("status").about("Show whether a session token is stored"))
        .subcommand(
            Command::new("login")
                .about("Log in and store the bearer token")
                .arg(username_arg())
                .arg(password_arg()),
        )
        .subcommand(
            Command::new("signup")
                .about("Create an account")
                .arg(username_arg().required(true))
                .arg(
                    Arg::new("email")
                        .short('e')
                        .long("email")
                        .help("Account email")
                        .required(true),
                )
                .arg(password_arg()),
        )
        .subcommand(Command::new("logout").about("Forget the stored token"))
        .subcommand(Command::new("whoami").about("Fetch the protected greeting"))
        .subcommand(
            Command::new("todo")
                .about("Manage todos on the SOAP service")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("List all todos"))
                .subcommand(Command::new("get").about("Show one todo").arg(id_arg()))
                .subcommand(
                    Command::new("add")
                        .about("Add a todo")
                        .arg(title_arg())
                        .arg(completed_arg()),
                )
                .subcommand(
                    Command::new("update")
                        .about("Replace a todo's title and completion flag")
                        .arg(id_arg())
                        .arg(title_arg())
                        .arg(completed_arg()),
                )
                .subcommand(Command::new("delete").about("Delete a todo").arg(id_arg())),
        )
}
