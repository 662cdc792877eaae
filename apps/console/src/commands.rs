//! Parsing of interactive console lines.

use ecole_auth::{AccessRequirement, RegistrationForm, Role};
use ecole_notifications::{NewNotification, NotificationKind, NotificationPriority};

#[derive(Debug, Clone)]
pub enum ConsoleCommand {
    Help,
    Quit,
    Demo,
    Login { email: String, password: String },
    Register(RegistrationForm),
    Logout,
    Whoami,
    Can(String),
    Role(Role),
    Guard(AccessRequirement),
    Notifications,
    Unread,
    Read(String),
    ReadAll,
    Delete(String),
    Notify(NewNotification),
}

pub const HELP: &[(&str, &str)] = &[
    ("/help, /h", "Show this help"),
    ("/demo", "List demo accounts"),
    ("/login <email> <password>", "Sign in"),
    (
        "/register <role> <email> <password> <confirm> <class|-> <name...>",
        "Create an account and sign in",
    ),
    ("/logout", "Sign out"),
    ("/whoami", "Show the signed-in identity"),
    ("/can <permission>", "Check a permission"),
    ("/role <role>", "Check the current role"),
    ("/guard <role|-> [permission]", "Evaluate a view guard"),
    ("/notifications, /n", "List notifications"),
    ("/unread", "Show the unread count"),
    ("/read <id>", "Mark one notification as read"),
    ("/read-all", "Mark every notification as read"),
    ("/delete <id>", "Delete a notification"),
    (
        "/notify <kind> <priority> <title> | <message> [| <url>]",
        "Add a notification for yourself",
    ),
    ("/quit, /exit, /q", "Exit console"),
];

pub fn parse(line: &str) -> Result<ConsoleCommand, String> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match head {
        "/help" | "/h" => ConsoleCommand::Help,
        "/quit" | "/exit" | "/q" => ConsoleCommand::Quit,
        "/demo" => ConsoleCommand::Demo,
        "/login" => match args.as_slice() {
            [email, password] => ConsoleCommand::Login {
                email: email.to_string(),
                password: password.to_string(),
            },
            _ => return Err("usage: /login <email> <password>".into()),
        },
        "/register" => parse_register(&args)?,
        "/logout" => ConsoleCommand::Logout,
        "/whoami" => ConsoleCommand::Whoami,
        "/can" => match args.as_slice() {
            [permission] => ConsoleCommand::Can(permission.to_string()),
            _ => return Err("usage: /can <permission>".into()),
        },
        "/role" => match args.as_slice() {
            [role] => ConsoleCommand::Role(role.parse().map_err(|e| format!("{e}"))?),
            _ => return Err("usage: /role <role>".into()),
        },
        "/guard" => parse_guard(&args)?,
        "/notifications" | "/n" => ConsoleCommand::Notifications,
        "/unread" => ConsoleCommand::Unread,
        "/read" => match args.as_slice() {
            [id] => ConsoleCommand::Read(id.to_string()),
            _ => return Err("usage: /read <id>".into()),
        },
        "/read-all" => ConsoleCommand::ReadAll,
        "/delete" => match args.as_slice() {
            [id] => ConsoleCommand::Delete(id.to_string()),
            _ => return Err("usage: /delete <id>".into()),
        },
        "/notify" => parse_notify(rest)?,
        other => return Err(format!("unknown command: {other} (try /help)")),
    };

    Ok(command)
}

fn parse_register(args: &[&str]) -> Result<ConsoleCommand, String> {
    let [role, email, password, confirm, class, name @ ..] = args else {
        return Err(
            "usage: /register <role> <email> <password> <confirm> <class|-> <name...>".into(),
        );
    };
    if name.is_empty() {
        return Err("a name is required".into());
    }

    let role: Role = role.parse().map_err(|e| format!("{e}"))?;
    let mut form = RegistrationForm::new(role);
    form.email = email.to_string();
    form.password = password.to_string();
    form.confirm_password = confirm.to_string();
    form.name = name.join(" ");
    if *class != "-" {
        form.class_id = class.to_string();
    }

    Ok(ConsoleCommand::Register(form))
}

fn parse_guard(args: &[&str]) -> Result<ConsoleCommand, String> {
    let (role, permission) = match args {
        [role] => (*role, None),
        [role, permission] => (*role, Some(*permission)),
        _ => return Err("usage: /guard <role|-> [permission]".into()),
    };

    let mut requirement = AccessRequirement::default();
    if role != "-" {
        requirement.role = Some(role.parse().map_err(|e| format!("{e}"))?);
    }
    requirement.permission = permission.map(str::to_string);

    Ok(ConsoleCommand::Guard(requirement))
}

/// Split off the first whitespace-delimited word.
fn next_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    Some(match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (input, ""),
    })
}

fn parse_notify(rest: &str) -> Result<ConsoleCommand, String> {
    const USAGE: &str = "usage: /notify <kind> <priority> <title> | <message> [| <url>]";

    let (kind, rest) = next_word(rest).ok_or(USAGE)?;
    let (priority, body) = next_word(rest).ok_or(USAGE)?;

    let mut fields = body.splitn(3, '|').map(str::trim);
    let (Some(title), Some(message)) = (fields.next(), fields.next()) else {
        return Err(USAGE.into());
    };
    if title.is_empty() {
        return Err(USAGE.into());
    }
    let action_url = fields.next().filter(|url| !url.is_empty());

    let kind = kind
        .parse::<NotificationKind>()
        .map_err(|e| e.to_string())?;
    let priority = priority
        .parse::<NotificationPriority>()
        .map_err(|e| e.to_string())?;

    let mut new = NewNotification::new(title, message, kind, priority);
    if let Some(url) = action_url {
        new = new.with_action_url(url);
    }
    Ok(ConsoleCommand::Notify(new))
}
