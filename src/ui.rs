use anyhow::Result;
use console::{Style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use keyphrase::{Error, Options, Params};
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal};
use std::path::Path;
use std::time::{Duration, Instant};
use zeroize::Zeroizing;

pub const MIN_PASSPHRASE_BYTES: usize = 16;

pub struct InputInfo {
    pub passphrase_bytes: usize,
    pub keyfile_bytes: u64,
}

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub numbered: bool,
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stderr)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "!")
    } else {
        ("+", "!")
    }
}

/// Ask twice for the passphrase with echo disabled.
pub fn prompt_passphrase() -> keyphrase::Result<Zeroizing<Vec<u8>>> {
    prompt_on_terminal(io::stdin().is_terminal(), |prompt| rpassword::prompt_password(prompt))
}

/// Refuses to prompt at all unless stdin is a terminal.
fn prompt_on_terminal<F>(is_terminal: bool, read: F) -> keyphrase::Result<Zeroizing<Vec<u8>>>
where
    F: FnMut(&str) -> io::Result<String>,
{
    if !is_terminal {
        return Err(Error::Terminal);
    }

    read_confirmed(read)
}

/// Both entries are read before comparing; a mismatch yields no passphrase.
fn read_confirmed<F>(mut read: F) -> keyphrase::Result<Zeroizing<Vec<u8>>>
where
    F: FnMut(&str) -> io::Result<String>,
{
    let first = Zeroizing::new(read("enter passphrase: ").map_err(Error::Prompt)?);
    let second = Zeroizing::new(read("confirm passphrase: ").map_err(Error::Prompt)?);

    if first.as_bytes() != second.as_bytes() {
        return Err(Error::PassphraseMismatch);
    }

    Ok(Zeroizing::new(first.as_bytes().to_vec()))
}

/// First line of `path`, without its line terminator.
pub fn read_passphrase_file(path: &Path) -> keyphrase::Result<Zeroizing<Vec<u8>>> {
    let io_err = |source| Error::PassphraseFile {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let passphrase = first_line(BufReader::new(file)).map_err(io_err)?;

    if passphrase.is_empty() {
        tracing::warn!(path = %path.display(), "passphrase file yields an empty passphrase");
    }

    Ok(passphrase)
}

fn first_line<R: BufRead>(mut reader: R) -> io::Result<Zeroizing<Vec<u8>>> {
    let mut line = Zeroizing::new(Vec::new());
    reader.read_until(b'\n', &mut line)?;

    if line.last() == Some(&b'\n') {
        line.pop();
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }

    Ok(line)
}

pub fn show_progress<F, T>(spinner: bool, unicode_support: bool, f: F) -> Result<(T, Duration)>
where
    F: FnOnce() -> Result<T>,
{
    if !spinner {
        let start = Instant::now();
        let result = f();
        return result.map(|r| (r, start.elapsed()));
    }

    let term = Term::stderr();
    term.hide_cursor().ok();

    let pb = ProgressBar::new_spinner();

    if unicode_support {
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"]),
        );
    } else {
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("-\\|/-"),
        );
    }

    pb.set_message("Deriving key...");
    pb.enable_steady_tick(Duration::from_millis(80));

    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();

    pb.finish_and_clear();
    term.show_cursor().ok();

    result.map(|r| (r, elapsed))
}

pub fn format_line(index: usize, password: &str, numbered: bool) -> String {
    if numbered {
        format!("{:02}: {}", index + 1, password)
    } else {
        password.to_string()
    }
}

pub fn display_output(passwords: &[Zeroizing<String>], options: &DisplayOptions) {
    for (i, password) in passwords.iter().enumerate() {
        let line = Zeroizing::new(format_line(i, password, options.numbered));
        println!("{}", &*line);
    }
}

fn status_style(secure: bool, options: &DisplayOptions) -> Style {
    if !options.color_support {
        Style::new()
    } else if secure {
        Style::new().green()
    } else {
        Style::new().yellow()
    }
}

pub fn passphrase_is_strong(bytes: usize) -> bool {
    bytes >= MIN_PASSPHRASE_BYTES
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}

pub fn display_summary(
    input_info: &InputInfo,
    params: &Params,
    run: &Options,
    elapsed: Duration,
    options: &DisplayOptions,
) {
    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);

    let passphrase_secure = passphrase_is_strong(input_info.passphrase_bytes);
    let passphrase_style = status_style(passphrase_secure, options);

    let passphrase_status = if passphrase_secure {
        check_ok
    } else {
        check_warn
    };

    println!();
    println!("Settings:");

    println!("  ├─ KDF         PBKDF2-HMAC-SHA256 ({} rounds)", params.rounds);

    println!(
        "  ├─ Passphrase  {} {} {}",
        passphrase_style.apply_to(format!("[{}]", passphrase_status)),
        passphrase_style.apply_to(input_info.passphrase_bytes),
        plural(input_info.passphrase_bytes, "byte", "bytes")
    );

    println!("  ├─ Salt        SHA-256 of keyfile ({} bytes)", input_info.keyfile_bytes);
    println!("  ├─ Keystream   AES-256-CTR");
    println!("  ├─ Encoding    Base32 (RFC 4648, unpadded)");

    if run.debug {
        println!("  ├─ Debug       on");
    }

    println!(
        "  └─ Output      {} × {} {}",
        params.password_count,
        params.password_length,
        plural(params.password_length, "char", "chars")
    );

    println!();

    println!("Stats:");

    println!("  ├─ Entropy     {} bits per password", params.bits_per_password());
    println!("  ├─ Charset     32 chars");
    println!("  └─ Time        {:.1}s", elapsed.as_secs_f64());
}
