/// Join a base URL and a served name with exactly one separator between
/// them, whether or not the base already ends with one.
#[must_use]
pub fn compose(base: &str, name: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), name)
}

#[cfg(test)]
mod tests {
    use super::compose;

    #[test]
    fn base_without_trailing_slash() {
        assert_eq!(compose("http://192.168.1.5", "report.pdf"), "http://192.168.1.5/report.pdf");
    }

    #[test]
    fn base_with_trailing_slash() {
        assert_eq!(compose("http://192.168.1.5/", "report.pdf"), "http://192.168.1.5/report.pdf");
    }

    #[test]
    fn extra_trailing_slashes_collapse_to_one() {
        assert_eq!(compose("http://host//", "file.bin"), "http://host/file.bin");
    }

    #[test]
    fn result_ends_with_the_name() {
        let url = compose("http://host:8080", "Photo.JPG");
        assert!(url.ends_with("/Photo.JPG"));
    }
}
