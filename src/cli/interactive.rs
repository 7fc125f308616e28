use super::ui;
use crate::core::{ConversionController, RevealOnce, UiStatus};
use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

const HELP: &str = "\
Commands:
  amount <value>         set the amount (comma or dot as decimal separator)
  from <code>            set the currency to convert from
  to <code>              set the currency to convert to
  swap                   exchange the two currencies
  convert (or Enter)     fetch the rate and convert
  <amount> <from> <to>   set everything and convert
  show                   print the form again
  help                   print this help
  quit                   leave";

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Amount(&'a str),
    From(&'a str),
    To(&'a str),
    Swap,
    Convert,
    Quick {
        amount: &'a str,
        from: &'a str,
        to: &'a str,
    },
    Show,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Command::Convert;
    }

    let (head, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(h, r)| (h, r.trim()));

    match (head.to_ascii_lowercase().as_str(), rest) {
        ("amount", value) if !value.is_empty() => Command::Amount(value),
        ("from", code) if !code.is_empty() => Command::From(code),
        ("to", code) if !code.is_empty() => Command::To(code),
        ("swap", "") => Command::Swap,
        ("convert", "") => Command::Convert,
        ("show", "") => Command::Show,
        ("help" | "?", "") => Command::Help,
        ("quit" | "exit" | "q", "") => Command::Quit,
        _ => {
            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts.as_slice() {
                [amount, from, to] => Command::Quick {
                    amount: *amount,
                    from: *from,
                    to: *to,
                },
                _ => Command::Unknown(line),
            }
        }
    }
}

fn render<W: Write>(out: &mut W, controller: &ConversionController) -> Result<()> {
    writeln!(out, "{}", ui::render_form(controller.form()))?;
    if let Some(status) = ui::render_status(controller.status()) {
        writeln!(out, "{status}")?;
    }
    Ok(())
}

async fn submit<W: Write>(out: &mut W, controller: &mut ConversionController) -> Result<()> {
    // Mirrors the disabled submit control. Only reachable when the caller
    // handed over a controller with a request already started.
    if controller.is_loading() {
        writeln!(out, "{}", ui::style_text("Converting…", ui::StyleType::Subtle))?;
        return Ok(());
    }
    let pb = ui::new_spinner("Converting…");
    controller.submit().await;
    pb.finish_and_clear();
    Ok(())
}

/// Runs the converter as a line-oriented session until `quit` or end of input.
///
/// Lines that are not valid UTF-8 are decoded lossily and handled like any
/// other input, so a bad byte never ends the session.
pub async fn run<R, W>(
    controller: &mut ConversionController,
    mut input: R,
    mut out: W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut promo = RevealOnce::default();

    writeln!(out, "{}", ui::style_text(ui::TITLE, ui::StyleType::Title))?;
    writeln!(out, "{}\n", ui::SUBTITLE)?;
    writeln!(out, "{}\n", ui::style_text(HELP, ui::StyleType::Subtle))?;
    render(&mut out, controller)?;

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let command = parse_command(&line);
        debug!(?command, "Session command");

        match command {
            Command::Amount(value) => controller.set_amount(value),
            Command::From(code) => controller.set_source(code),
            Command::To(code) => controller.set_target(code),
            Command::Swap => controller.swap(),
            Command::Convert => submit(&mut out, controller).await?,
            Command::Quick { amount, from, to } => {
                controller.set_amount(amount);
                controller.set_source(from);
                controller.set_target(to);
                submit(&mut out, controller).await?;
            }
            Command::Show => {}
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::Quit => break,
            Command::Unknown(text) => {
                writeln!(
                    out,
                    "{}",
                    ui::style_text(
                        &format!("Unknown command: {text} (type `help`)"),
                        ui::StyleType::Error
                    )
                )?;
                continue;
            }
        }

        render(&mut out, controller)?;

        // The promo sits below the result area and shows once it is filled
        if matches!(controller.status(), UiStatus::Success(_)) && promo.observe(1.0) {
            writeln!(
                out,
                "\n{}",
                ui::style_text(ui::PROMO_NOTE, ui::StyleType::Highlight)
            )?;
        }
    }

    promo.dispose();
    writeln!(out, "\n{}", ui::style_text(ui::MID_MARKET_NOTE, ui::StyleType::Subtle))?;
    out.flush()?;
    Ok(())
}
