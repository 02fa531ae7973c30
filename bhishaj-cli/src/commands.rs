//! Parsing of chat REPL input

use std::path::PathBuf;

/// One line of chat input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Plain text to send along with any pending attachments
    Send(String),
    /// Send pending attachments without text
    SendAttachments,
    /// Queue images from disk
    AttachImages(Vec<PathBuf>),
    /// Queue documents from disk
    AttachDocuments(Vec<PathBuf>),
    /// Try the camera
    Camera,
    /// Remove a pending attachment by id
    Drop(String),
    /// Compose into a new session
    New,
    /// List sessions
    History,
    /// Make a session active, by id or 1-based history position
    Switch(String),
    /// Delete a session, by id or 1-based history position
    Delete(String),
    /// Print the active session
    Show,
    Help,
    Quit,
    /// Blank line
    Empty,
}

impl ChatCommand {
    /// Parse a REPL line. Unknown slash commands are an error string.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(ChatCommand::Empty);
        }
        // `//text` sends text that starts with a slash.
        if let Some(rest) = line.strip_prefix("//") {
            return Ok(ChatCommand::Send(format!("/{}", rest)));
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(ChatCommand::Send(line.to_string()));
        };

        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = parts.collect();

        match name.as_str() {
            "send" => Ok(ChatCommand::SendAttachments),
            "image" | "images" => paths(&args, "/image").map(ChatCommand::AttachImages),
            "doc" | "docs" | "document" => paths(&args, "/doc").map(ChatCommand::AttachDocuments),
            "camera" => Ok(ChatCommand::Camera),
            "drop" => single(&args, "/drop <attachment-id>").map(ChatCommand::Drop),
            "new" => Ok(ChatCommand::New),
            "history" | "ls" => Ok(ChatCommand::History),
            "switch" => single(&args, "/switch <session>").map(ChatCommand::Switch),
            "delete" | "rm" => single(&args, "/delete <session>").map(ChatCommand::Delete),
            "show" => Ok(ChatCommand::Show),
            "help" | "?" => Ok(ChatCommand::Help),
            "quit" | "exit" | "q" => Ok(ChatCommand::Quit),
            other => Err(format!("Unknown command: /{} (try /help)", other)),
        }
    }
}

fn paths(args: &[&str], usage: &str) -> Result<Vec<PathBuf>, String> {
    if args.is_empty() {
        return Err(format!("Usage: {} <path>...", usage));
    }
    Ok(args.iter().map(PathBuf::from).collect())
}

fn single(args: &[&str], usage: &str) -> Result<String, String> {
    match args {
        [one] => Ok((*one).to_string()),
        _ => Err(format!("Usage: {}", usage)),
    }
}

pub const HELP: &str = "\
Type a message and press enter to send it.
  /image <path>...   attach images
  /doc <path>...     attach documents
  /camera            capture a photo
  /drop <id>         remove a pending attachment
  /send              send pending attachments without text
  /new               start a new chat
  /history           list chats
  /switch <n|id>     open a chat
  /delete <n|id>     delete a chat
  /show              print the current chat
  /quit              leave";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_send() {
        assert_eq!(
            ChatCommand::parse("  How to treat headache? "),
            Ok(ChatCommand::Send("How to treat headache?".to_string()))
        );
        assert_eq!(ChatCommand::parse("   "), Ok(ChatCommand::Empty));
    }

    #[test]
    fn test_escaped_slash() {
        assert_eq!(
            ChatCommand::parse("//etc is a dir"),
            Ok(ChatCommand::Send("/etc is a dir".to_string()))
        );
    }

    #[test]
    fn test_attach_commands() {
        assert_eq!(
            ChatCommand::parse("/image a.jpg b.png"),
            Ok(ChatCommand::AttachImages(vec![
                PathBuf::from("a.jpg"),
                PathBuf::from("b.png")
            ]))
        );
        assert_eq!(
            ChatCommand::parse("/doc labs.pdf"),
            Ok(ChatCommand::AttachDocuments(vec![PathBuf::from("labs.pdf")]))
        );
        assert!(ChatCommand::parse("/image").is_err());
    }

    #[test]
    fn test_session_commands() {
        assert_eq!(ChatCommand::parse("/NEW"), Ok(ChatCommand::New));
        assert_eq!(
            ChatCommand::parse("/switch 2"),
            Ok(ChatCommand::Switch("2".to_string()))
        );
        assert_eq!(
            ChatCommand::parse("/rm session-1"),
            Ok(ChatCommand::Delete("session-1".to_string()))
        );
        assert!(ChatCommand::parse("/switch").is_err());
        assert!(ChatCommand::parse("/switch a b").is_err());
    }

    #[test]
    fn test_unknown_command() {
        let err = ChatCommand::parse("/dance").unwrap_err();
        assert!(err.contains("/dance"));
    }
}
