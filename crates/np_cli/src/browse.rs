use async_trait::async_trait;
use np_core::Result;
use np_nav::{ContentContainer, Event, NavigationController, NavigationOutcome};
use np_render::Fragment;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdout};
use tokio::sync::Mutex;
use tracing::debug;

const HELP: &str = "\
Commands:
  main                 front page
  category <key>       e.g. category tech
  source <key>         e.g. source social
  article <id>         open an article
  search <query>       search articles
  page <n>             go to page n of the current list
  filter [category=<key>] [source=<key>]
                       narrow the front page, `filter` alone resets
  back | forward       move through history
  reload               load the current page again
  quit";

/// Content container that prints each fragment as plain text.
pub struct TextContainer<W> {
    out: Mutex<W>,
}

impl<W> TextContainer<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl TextContainer<Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

#[async_trait]
impl<W> ContentContainer for TextContainer<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn swap(&self, fragment: Fragment) -> Result<()> {
        let mut out = self.out.lock().await;
        out.write_all(format!("{}\n\n", fragment.to_text()).as_bytes()).await?;
        out.flush().await?;
        Ok(())
    }
}

/// Reads commands from stdin until `quit` or end of input.
pub async fn run(controller: &NavigationController, location: &str) -> anyhow::Result<()> {
    controller.start(location).await;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout
            .write_all(format!("{}> ", controller.current_url().await).as_bytes())
            .await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "" => continue,
            "quit" | "exit" | "q" => break,
            "help" | "?" => println!("{}", HELP),
            command => match command.parse::<Event>() {
                Ok(event) => {
                    let outcome = controller.dispatch(event).await;
                    debug!("{} -> {:?}", command, outcome);
                    if outcome == NavigationOutcome::Ignored {
                        println!("Nothing to do here.");
                    }
                }
                Err(e) => println!("{} (type `help` for commands)", e),
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_text_container_prints_text() {
        let container = TextContainer::new(Vec::new());
        container
            .swap(Fragment::new("<div><h2>Ошибка</h2><p>Статья   не найдена</p></div>"))
            .await
            .unwrap();
        let printed = String::from_utf8(container.into_inner()).unwrap();
        assert_eq!(printed, "Ошибка\nСтатья не найдена\n\n");
    }
}
