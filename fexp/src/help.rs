use crate::command::CommandKind;

pub fn format_help(kind: CommandKind) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} - {}\n\n", kind.name(), kind.summary()));
    out.push_str(&format!("Usage: {}\n", kind.usage()));
    out
}

pub fn format_help_list() -> String {
    let mut out = String::new();
    out.push_str("Commands:\n");

    for kind in CommandKind::ALL {
        out.push_str(&format!("  {:30} {}\n", kind.usage(), kind.summary()));
    }

    out.push_str("\nUse 'help COMMAND' for more information.\n");
    out
}
