/*!
 * Directory-name classifier deciding which folders are left out of a scan
 */

use std::collections::HashSet;

use glob_match::glob_match;
use once_cell::sync::Lazy;

/// Default directory names to ignore
pub static DEFAULT_IGNORE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // IDEs & Editors
        ".idea",
        ".vscode",
        ".vs",
        "nbproject",
        ".settings",
        ".metadata",
        "xcuserdata",
        "*.xcworkspace",
        "*.xcodeproj/xcuserdata",
        ".history",
        ".sublime-workspace",
        ".ropeproject",
        ".vim",
        "emacs.d",
        ".spacemacs.d",
        ".kdev4",
        ".komodoproject",
        // Version Control
        ".git",
        ".svn",
        ".hg",
        "CVS",
        ".bzr",
        // Environments & Dependencies
        "env",
        "venv",
        ".venv",
        "node_modules",
        "vendor",
        "bower_components",
        "jspm_packages",
        "__pypackages__",
        ".pytest_cache",
        ".mypy_cache",
        ".yarn",
        "Pods",
        "DerivedData",
        "elm-stuff",
        "_esy",
        ".cargo",
        ".dub",
        ".dart_tool",
        ".flutter-plugins",
        ".pub-cache",
        ".clj-kondo",
        ".lsp",
        ".shadow-cljs",
        ".bloop",
        ".metals",
        ".ammonite",
        ".ensime_cache",
        ".bsp",
        ".gradle",
        ".mvn",
        ".lein-*",
        ".nvm",
        ".npm",
        ".pnpm",
        ".yvm",
        // Build & Output
        "build",
        "dist",
        "out",
        "bin",
        "obj",
        "target",
        "deps",
        "_build",
        "release",
        "cmake-build-*",
        "dist-ssr",
        "dist-server",
        ".build",
        "out-tsc",
        "Debug",
        "Release",
        "x64",
        "ipch",
        ".externalNativeBuild",
        "captures",
        "generated",
        "compiled",
        // Caches & Temp
        ".cache",
        ".sass-cache",
        ".parcel-cache",
        ".nyc_output",
        ".jest-cache",
        ".fusebox",
        ".temp",
        ".tmp",
        ".turbo",
        ".rush",
        ".lazy",
        ".eslintcache",
        ".stylelintcache",
        // Testing & Coverage
        "coverage",
        ".jest",
        "lcov-info",
        ".allure",
        ".pytest",
        // Frameworks & Libraries
        ".next",
        ".nuxt",
        "public",
        ".expo",
        ".svelte-kit",
        ".quasar",
        ".astro",
        ".serverless",
        ".terraform",
        ".terragrunt-cache",
        ".nextflow",
        ".scrapy",
        ".spago",
        ".redwood",
        ".angular",
        ".vuepress",
        ".docusaurus",
        ".gatsby",
        ".hexo",
        ".jekyll",
        ".middleman",
        ".react-static",
        ".sapper",
        ".stencil",
        ".storybook",
        ".vite",
        ".webpack",
        // Other
        ".ipynb_checkpoints",
        ".hypothesis",
        "wwwroot",
        ".replit",
        ".Trash",
        "lost+found",
        ".direnv",
        ".envs",
        ".logs",
        ".pids",
        ".ssh",
        ".vagrant",
        ".vscode-test",
        ".vsconfig",
        ".vspscc",
        ".vssscc",
        ".vsix",
        ".vscodeignore",
        ".vsixmanifest",
        // OS Files
        ".DS_Store",
        "Thumbs.db",
        "Desktop.ini",
        "$RECYCLE.BIN",
        ".Spotlight-V100",
        ".TemporaryItems",
        // Cloud & Infrastructure
        ".cdk.out",
        ".pulumi",
        ".sst",
        ".amplify",
        ".aws-sam",
        ".cloudformation",
        // Database
        ".sqlite",
        ".index",
        ".leveldb",
        ".rocksdb",
        ".mongodb",
        ".mysql",
        ".postgres",
        // Language specific
        ".classpath",
        ".project",
        ".factorypath",
        ".apt_generated",
        ".cquery_results",
        ".ccls-cache",
        ".deps",
        ".libs",
        ".aux",
        ".stack-work",
        "dist-newstyle",
        "_opam",
        ".phpintel",
        ".phpunit.result.cache",
        ".rspec",
        ".ruby-version",
        ".ruby-gemset",
        ".swc",
        ".tsbuildinfo",
    ]
    .into_iter()
    .collect()
});

/// Decides whether a directory basename is excluded from traversal
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    /// Names matched by exact equality
    names: HashSet<String>,
    /// Whether entries containing `*`, `?` or `[` are also tried as globs
    glob: bool,
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self::new(true, Vec::<String>::new(), false)
    }
}

impl IgnoreRules {
    /// Build a rule set from the defaults (optionally) plus extra names
    pub fn new<I, S>(use_defaults: bool, extra: I, glob: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: HashSet<String> = if use_defaults {
            DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect()
        } else {
            HashSet::new()
        };
        names.extend(extra.into_iter().map(Into::into));

        Self { names, glob }
    }

    /// Check whether a single path segment names an ignored directory.
    ///
    /// Matching is literal equality unless glob mode was requested, so a
    /// default entry like `cmake-build-*` only ever matches that exact name.
    pub fn is_ignored(&self, name: &str) -> bool {
        if self.names.contains(name) {
            return true;
        }

        self.glob
            && self
                .names
                .iter()
                .filter(|pattern| is_glob(pattern))
                .any(|pattern| glob_match(pattern, name))
    }

    /// Number of names in the rule set
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the rule set ignores nothing
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}
