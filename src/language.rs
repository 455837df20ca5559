/*!
 * File extension to markdown fence tag lookup
 */

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::bail;
use crate::error::Result;

/// Fence tag used when an extension is missing or unknown
pub const DEFAULT_LANGUAGE: &str = "text";

/// Built-in extension table, keys include the leading dot
pub static EXTENSION_LANGUAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (".1c", "1c"),
        (".4d", "4d"),
        (".abap", "sap-abap"),
        (".abnf", "abnf"),
        (".ada", "ada"),
        (".ak", "aiken"),
        (".apache", "apache"),
        (".applescript", "applescript"),
        (".arcade", "arcade"),
        (".asciidoc", "asciidoc"),
        (".adoc", "asciidoc"),
        (".avrasm", "avrasm"),
        (".actionscript", "actionscript"),
        (".as", "actionscript"),
        (".alan", "alan"),
        (".asc", "angelscript"),
        (".armasm", "armasm"),
        (".arduino", "arduino"),
        (".ino", "arduino"),
        // General purpose
        (".py", "python"),
        (".gyp", "python"),
        (".js", "javascript"),
        (".jsx", "javascript"),
        (".java", "java"),
        (".jsp", "java"),
        (".cpp", "cpp"),
        (".hpp", "cpp"),
        (".cc", "cpp"),
        (".cxx", "cpp"),
        (".c", "c"),
        (".h", "c"),
        (".cs", "csharp"),
        (".go", "go"),
        (".rs", "rust"),
        (".rb", "ruby"),
        (".gemspec", "ruby"),
        (".podspec", "ruby"),
        (".php", "php"),
        (".swift", "swift"),
        (".kt", "kotlin"),
        (".kts", "kotlin"),
        (".pl", "perl"),
        (".pm", "perl"),
        (".sh", "bash"),
        (".zsh", "bash"),
        (".ps1", "powershell"),
        (".ps", "powershell"),
        (".bat", "dos"),
        (".cmd", "dos"),
        (".lua", "lua"),
        (".r", "r"),
        (".dart", "dart"),
        (".hs", "haskell"),
        (".scala", "scala"),
        (".ex", "elixir"),
        (".exs", "elixir"),
        (".erl", "erlang"),
        (".sql", "sql"),
        (".fs", "fsharp"),
        (".fsx", "fsharp"),
        (".clj", "clojure"),
        (".groovy", "groovy"),
        (".d", "d"),
        (".ml", "ocaml"),
        (".pas", "pascal"),
        (".vbs", "vbscript"),
        (".asm", "x86asm"),
        // Markup, styles & data
        (".html", "html"),
        (".xhtml", "html"),
        (".css", "css"),
        (".scss", "scss"),
        (".md", "markdown"),
        (".mkd", "markdown"),
        (".mkdn", "markdown"),
        (".xml", "xml"),
        (".svg", "xml"),
        (".atom", "xml"),
        (".rss", "xml"),
        (".json", "json"),
        (".jsonc", "json"),
        (".yaml", "yaml"),
        (".yml", "yaml"),
        (".toml", "ini"),
        (".ini", "ini"),
        (".haml", "haml"),
        (".hbs", "handlebars"),
        (".ts", "typescript"),
        (".tsx", "typescript"),
        (".svelte", "svelte"),
        // Tooling & misc
        (".dockerfile", "docker"),
        (".docker", "docker"),
        (".nginx", "nginx"),
        (".cmake", "cmake"),
        (".makefile", "makefile"),
        (".mk", "makefile"),
        (".txt", "plaintext"),
        (".text", "plaintext"),
        (".diff", "diff"),
        (".log", "accesslog"),
        (".conf", "nginx"),
        (".zig", "zig"),
        (".odin", "odin"),
        (".v", "verilog"),
        (".cshtml", "cshtml"),
        (".tf", "terraform"),
        (".rsl", "rsl"),
        (".sol", "solidity"),
        (".stl", "structured-text"),
    ])
});

/// Extension of a file name, leading dot included.
///
/// Leading dots of hidden files never start an extension, so `.bashrc`
/// has none while `.config.json` has `.json`.
pub fn extension(file_name: &str) -> Option<&str> {
    let stem_start = file_name.len() - file_name.trim_start_matches('.').len();
    file_name[stem_start..]
        .rfind('.')
        .map(|pos| &file_name[stem_start + pos..])
}

/// Fence tag for a file name using the built-in table
pub fn detect_language(file_name: &str) -> &'static str {
    extension(file_name)
        .and_then(|ext| EXTENSION_LANGUAGES.get(ext).copied())
        .unwrap_or(DEFAULT_LANGUAGE)
}

/// Built-in table with optional user overrides layered on top
#[derive(Debug, Clone, Default)]
pub struct LanguageMap {
    overrides: HashMap<String, String>,
}

impl LanguageMap {
    /// Parse `.ext=tag` entries; a missing leading dot is added
    pub fn with_overrides<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        let mut overrides = HashMap::new();

        for entry in entries {
            let entry = entry.as_ref();
            let Some((ext, tag)) = entry.split_once('=') else {
                bail!(InvalidArgument, "Expected `.ext=tag`, got `{}`", entry);
            };
            let (ext, tag) = (ext.trim(), tag.trim());
            if ext.trim_start_matches('.').is_empty() || tag.is_empty() {
                bail!(InvalidArgument, "Expected `.ext=tag`, got `{}`", entry);
            }

            let ext = if ext.starts_with('.') {
                ext.to_string()
            } else {
                format!(".{}", ext)
            };
            overrides.insert(ext, tag.to_string());
        }

        Ok(Self { overrides })
    }

    /// Fence tag for a file name
    pub fn detect<'a>(&'a self, file_name: &str) -> &'a str {
        match extension(file_name).and_then(|ext| self.overrides.get(ext)) {
            Some(tag) => tag.as_str(),
            None => detect_language(file_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension() {
        assert_eq!(extension("main.rs"), Some(".rs"));
        assert_eq!(extension("archive.tar.gz"), Some(".gz"));
        assert_eq!(extension("Makefile"), None);
        assert_eq!(extension(".bashrc"), None);
        assert_eq!(extension(".config.json"), Some(".json"));
        assert_eq!(extension("trailing."), Some("."));
    }

    #[test]
    fn test_detect_language() {
        assert_eq!(detect_language("lib.rs"), "rust");
        assert_eq!(detect_language("Cargo.toml"), "ini");
        assert_eq!(detect_language("notes.txt"), "plaintext");
        assert_eq!(detect_language("data.zzz"), DEFAULT_LANGUAGE);
        assert_eq!(detect_language("README"), DEFAULT_LANGUAGE);
        // Lookup is case sensitive
        assert_eq!(detect_language("LIB.RS"), DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_overrides() {
        let map = LanguageMap::with_overrides(&[".tpl=html", "toml = toml"]).unwrap();
        assert_eq!(map.detect("page.tpl"), "html");
        assert_eq!(map.detect("Cargo.toml"), "toml");
        assert_eq!(map.detect("main.rs"), "rust");
        assert_eq!(map.detect("blob.zzz"), DEFAULT_LANGUAGE);

        assert!(LanguageMap::with_overrides(&["tpl"]).is_err());
        assert!(LanguageMap::with_overrides(&[".=html"]).is_err());
        assert!(LanguageMap::with_overrides(&[".tpl="]).is_err());
    }
}
