use std::io::Write;

use tutti_onboarding::{Hint, Presenter, Tutorial};

/// Output sink the console presenters render into.
pub(crate) type ConsoleHost = dyn Write + 'static;

fn user_label(user_id: Option<&str>) -> &str {
    user_id.unwrap_or("anonymous")
}

/// Prints a hint as an indented bubble and marks it displayed.
#[derive(Debug, Default)]
pub(crate) struct ConsoleHintPresenter;

impl<H: Hint + ?Sized> Presenter<H> for ConsoleHintPresenter {
    type Host = ConsoleHost;
    type Anchor = str;

    fn present(&mut self, hint: &H, host: &mut Self::Host, anchor: &Self::Anchor) -> bool {
        let written = writeln!(
            host,
            "hint id={} user={} anchor={}\n  {}",
            hint.identifier(),
            user_label(hint.user_id()),
            anchor,
            hint.text()
        );
        if let Err(error) = written {
            tracing::warn!(%error, "failed to render hint");
            return false;
        }
        hint.mark_displayed();
        true
    }
}

/// Prints every page of a tutorial in order and marks it displayed. Declines
/// tutorials without pages.
#[derive(Debug, Default)]
pub(crate) struct ConsoleTutorialPresenter;

impl ConsoleTutorialPresenter {
    fn render<T: Tutorial + ?Sized>(
        tutorial: &T,
        host: &mut ConsoleHost,
        anchor: &str,
    ) -> std::io::Result<()> {
        let pages = tutorial.pages();
        writeln!(
            host,
            "tutorial id={} user={} anchor={} pages={}",
            tutorial.identifier(),
            user_label(tutorial.user_id()),
            anchor,
            pages.len()
        )?;
        for page in pages {
            writeln!(host, "  [{}/{}] {}", page.index + 1, tutorial.page_count(), page.title)?;
            writeln!(host, "      {}", page.text)?;
            if let Some(image_name) = page.image_name {
                writeln!(host, "      image={image_name}")?;
            }
        }
        Ok(())
    }
}

impl<T: Tutorial + ?Sized> Presenter<T> for ConsoleTutorialPresenter {
    type Host = ConsoleHost;
    type Anchor = str;

    fn present(&mut self, tutorial: &T, host: &mut Self::Host, anchor: &Self::Anchor) -> bool {
        if tutorial.page_count() == 0 {
            tracing::warn!(
                identifier = tutorial.identifier(),
                "declining tutorial without pages"
            );
            return false;
        }
        if let Err(error) = Self::render(tutorial, host, anchor) {
            tracing::warn!(%error, "failed to render tutorial");
            return false;
        }
        tutorial.mark_displayed();
        true
    }
}
