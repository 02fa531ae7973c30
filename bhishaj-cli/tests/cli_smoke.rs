use std::process::Command;

fn bhishaj() -> Command {
    Command::new(env!("CARGO_BIN_EXE_bhishaj"))
}

#[test]
fn test_habits_lists_every_card() {
    let temp = tempfile::TempDir::new().unwrap();
    let output = bhishaj()
        .args(["--config-dir"])
        .arg(temp.path())
        .arg("habits")
        .env("BHISHAJ__LOGGING__DIR", temp.path().join("logs"))
        .output()
        .expect("Failed to run bhishaj");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Take a 10-minute walk"));
    assert!(stdout.contains("Limit screen time"));
}

#[test]
fn test_onboard_then_status() {
    let temp = tempfile::TempDir::new().unwrap();
    let onboard = bhishaj()
        .arg("--config-dir")
        .arg(temp.path())
        .args(["onboard", "--force"])
        .output()
        .expect("Failed to run bhishaj");
    assert!(onboard.status.success());
    assert!(temp.path().join("config.json").exists());

    let status = bhishaj()
        .arg("--config-dir")
        .arg(temp.path())
        .arg("status")
        .env("BHISHAJ__LOGGING__DIR", temp.path().join("logs"))
        .output()
        .expect("Failed to run bhishaj");
    assert!(status.status.success());
    let stdout = String::from_utf8_lossy(&status.stdout);
    assert!(stdout.contains("title_max_chars"));
}

#[test]
fn test_chat_replies_from_piped_input() {
    use std::io::Write;
    use std::process::Stdio;

    let temp = tempfile::TempDir::new().unwrap();
    let mut child = bhishaj()
        .arg("--config-dir")
        .arg(temp.path())
        .arg("chat")
        .env("BHISHAJ__LOGGING__DIR", temp.path().join("logs"))
        .env("BHISHAJ__CHAT__REPLY_DELAY_MS", "0")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to run bhishaj");

    {
        let stdin = child.stdin.as_mut().unwrap();
        stdin.write_all(b"How to treat headache?\n").unwrap();
    }
    // Give the reply a moment to land before closing input.
    std::thread::sleep(std::time::Duration::from_millis(500));
    drop(child.stdin.take());

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Started chat \"How to treat headache?...\""));
    assert!(stdout.contains("bhishaj: Thanks for your question"));
}
