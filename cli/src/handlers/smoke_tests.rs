use clap::Parser;
use pretty_assertions::{assert_eq, assert_str_eq};
use rstest::{fixture, rstest};
use ruichiji_core::{
    config::SiteConfig,
    render::Renderer,
    source::{ContentKind, DirSource},
    test_utils::MemorySource,
};
use serde_json::json;

use crate::handlers::{Command, CommandHandler, Kind};

#[derive(Debug, Parser)]
struct Wrapper {
    #[clap(subcommand)]
    command: Command,
}

fn parse(args: &[&str]) -> Command {
    Wrapper::try_parse_from(std::iter::once("ruichiji").chain(args.iter().copied()))
        .unwrap()
        .command
}

#[fixture]
fn renderer() -> Renderer<MemorySource> {
    let source = MemorySource::new()
        .with(
            ContentKind::Music,
            &json!({"items": [{"id": "trk-01", "title": "Song", "date": "2024-01-01"}]}),
        )
        .with(
            ContentKind::Live,
            &json!([{"id": "live-1", "title": "Show", "setlist": ["Song", "Encore"]}]),
        )
        .failing(ContentKind::Topics, 500);
    Renderer::new(source, SiteConfig::default())
}

async fn run<S: ruichiji_core::source::DataSource>(
    command: &Command,
    renderer: &Renderer<S>,
) -> (anyhow::Result<()>, String, String) {
    let mut stdout = String::new();
    let mut stderr = String::new();
    let result = command.handle(renderer, &mut stdout, &mut stderr).await;
    (result, stdout, stderr)
}

#[rstest]
#[case(&["latest", "music"], Command::Latest { kind: Kind::Music })]
#[case(&["list", "discography"], Command::List { kind: Kind::Discography })]
#[case(&["show", "live", "--id", "live-1"], Command::Show { kind: Kind::Live, id: Some("live-1".into()) })]
#[case(&["show", "movies"], Command::Show { kind: Kind::Movies, id: None })]
#[case(&["fragment", "#movie-mv-01", "--movie"], Command::Fragment { hash: "#movie-mv-01".into(), movie: true })]
fn test_parse_commands(#[case] args: &[&str], #[case] expected: Command) {
    assert_eq!(format!("{:?}", parse(args)), format!("{expected:?}"));
}

#[rstest]
#[tokio::test]
async fn test_show_live(renderer: Renderer<MemorySource>) {
    let command = parse(&["show", "live", "--id", "live-1"]);

    let (result, stdout, stderr) = run(&command, &renderer).await;

    assert!(result.is_ok());
    assert!(stdout.contains(r#"<li>1. <a href="track.html?id=trk-01">Song</a></li>"#));
    assert!(stdout.contains("<li>2. Encore</li>"));
    assert_str_eq!(stderr, "");
}

#[rstest]
#[tokio::test]
async fn test_show_without_id(renderer: Renderer<MemorySource>) {
    let (result, stdout, _) = run(&parse(&["show", "music"]), &renderer).await;

    assert!(result.is_ok());
    assert_str_eq!(stdout, "<p>idが指定されていません。</p>");
}

#[rstest]
#[tokio::test]
async fn test_failed_render(renderer: Renderer<MemorySource>) {
    let (result, stdout, stderr) = run(&parse(&["list", "topics"]), &renderer).await;

    assert!(result.is_err());
    assert_str_eq!(stdout, "");
    assert!(stderr.starts_with("Nothing was rendered"));
}

#[rstest]
#[case(&["fragment", "#%E6%9B%B2"], "曲\n")]
#[case(&["fragment", "mv-01", "--movie"], "movie-mv-01\n")]
#[case(&["fragment", "#movie-mv-01", "--movie"], "movie-mv-01\n")]
#[tokio::test]
async fn test_fragment(
    renderer: Renderer<MemorySource>,
    #[case] args: &[&str],
    #[case] expected: &str,
) {
    let (result, stdout, _) = run(&parse(args), &renderer).await;

    assert!(result.is_ok());
    assert_str_eq!(stdout, expected);
}

#[rstest]
#[tokio::test]
async fn test_empty_fragment(renderer: Renderer<MemorySource>) {
    let (result, stdout, stderr) = run(&parse(&["fragment", "#"]), &renderer).await;

    assert!(result.is_err());
    assert_str_eq!(stdout, "");
    assert_str_eq!(stderr, "The fragment is empty\n");
}

#[tokio::test]
async fn test_renders_from_a_directory() -> anyhow::Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let data_dir = temp_dir.path().join("assets").join("data");
    std::fs::create_dir_all(&data_dir)?;
    std::fs::write(
        data_dir.join("discography.json"),
        "\u{feff}{\"items\": [{\"id\": \"al-01\", \"title\": \"First\", \"track_count\": 8}]}",
    )?;
    let renderer = Renderer::new(DirSource::new(&data_dir), SiteConfig::new("/assets"));

    let (result, stdout, _) = run(&parse(&["list", "discography"]), &renderer).await;

    result?;
    assert!(stdout.contains(r#"<img src="/assets/images/default-cover.svg" alt="" class="thumb">"#));
    assert!(stdout.contains("トラック数: 8"));
    Ok(())
}
