use rand::rngs::StdRng;
use rand::SeedableRng;
use termfolio::console::{execute_command, Console, Submitted, CAT_USAGE, README};
use termfolio::view::TranscriptLine;

fn run(input: &str) -> Option<String> {
    execute_command(input, &mut StdRng::seed_from_u64(42))
}

#[test]
fn cat_precedence() {
    assert_eq!(run("cat readme.md").as_deref(), Some(README));
    assert_eq!(run("cat").as_deref(), Some(CAT_USAGE));
    // No "cat missing.md" trigger, so the first token wins.
    assert_eq!(run("cat missing.md").as_deref(), Some(CAT_USAGE));
}

#[test]
fn echo_hello_world() {
    assert_eq!(run("echo hello world").as_deref(), Some("hello world"));
}

#[test]
fn transcript_growth_per_input() {
    let cases = [
        ("", 0),
        ("    ", 0),
        ("help", 2),
        ("definitely-not-a-command", 2),
        ("echo", 1),
        ("cat README.md", 2),
    ];
    for (input, expected) in cases {
        let mut console = Console::with_seed(3);
        console.submit(input);
        assert_eq!(console.transcript().len(), expected, "input {input:?}");
    }
}

#[test]
fn echoed_prompt_keeps_the_raw_input() {
    let mut console = Console::with_seed(3);
    let submitted = console.submit("  Echo <b>Bold</b>");
    assert_eq!(
        submitted,
        Submitted::Appended {
            output: "<b>bold</b>".into()
        }
    );
    assert_eq!(
        console.transcript().lines()[0],
        TranscriptLine::Prompt("  Echo <b>Bold</b>".into())
    );
    let html = console.transcript().to_html();
    assert!(html.contains("Echo &lt;b&gt;Bold&lt;/b&gt;"));
    assert!(html.contains("<div class=\"command-output\">&lt;b&gt;bold&lt;/b&gt;</div>"));
}

#[test]
fn clear_then_continue() {
    let mut console = Console::with_seed(3);
    console.submit("whoami");
    console.submit("clear");
    assert!(console.transcript().is_empty());
    console.submit("pwd");
    assert_eq!(
        console.transcript().lines(),
        &[
            TranscriptLine::Prompt("pwd".into()),
            TranscriptLine::Output("/home/jpdck/github.io".into()),
        ]
    );
    assert_eq!(console.transcript().scroll(), 1);
}

#[test]
fn sudo_is_refused_with_or_without_arguments() {
    let mut console = Console::with_seed(5);
    console.submit("sudo");
    console.submit("sudo rm -rf /");
    let refusal = TranscriptLine::Output(
        "Nice try. You're not getting root access to my portfolio.".into(),
    );
    assert_eq!(console.transcript().lines()[1], refusal);
    assert_eq!(console.transcript().lines()[3], refusal);
}
