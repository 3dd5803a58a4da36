use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Client framework whose `useForm` helper the generated file imports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontEndProvider {
    Vue,
    React,
    /// `svelte4` and `svelte5` share one adapter package.
    Svelte,
}

impl FrontEndProvider {
    pub fn use_form_import(self) -> &'static str {
        match self {
            FrontEndProvider::Vue => "import { useForm } from '@inertiajs/vue3';",
            FrontEndProvider::React => "import { useForm } from '@inertiajs/react';",
            FrontEndProvider::Svelte => "import { useForm } from '@inertiajs/svelte';",
        }
    }
}

impl FromStr for FrontEndProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vue" => Ok(FrontEndProvider::Vue),
            "react" => Ok(FrontEndProvider::React),
            "svelte4" | "svelte5" => Ok(FrontEndProvider::Svelte),
            other => Err(Error::UnknownProvider(other.to_string())),
        }
    }
}

impl fmt::Display for FrontEndProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FrontEndProvider::Vue => "vue",
            FrontEndProvider::React => "react",
            FrontEndProvider::Svelte => "svelte",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import_for(provider: &str) -> Result<&'static str, Error> {
        provider.parse::<FrontEndProvider>().map(FrontEndProvider::use_form_import)
    }

    #[test]
    fn recognized_providers_map_to_fixed_imports() {
        assert_eq!(import_for("vue").unwrap(), "import { useForm } from '@inertiajs/vue3';");
        assert_eq!(import_for("react").unwrap(), "import { useForm } from '@inertiajs/react';");
        assert_eq!(import_for("svelte4").unwrap(), "import { useForm } from '@inertiajs/svelte';");
        assert_eq!(import_for("svelte5").unwrap(), "import { useForm } from '@inertiajs/svelte';");
    }

    #[test]
    fn anything_else_is_rejected() {
        for provider in ["angular", "Vue", "", "svelte"] {
            match import_for(provider) {
                Err(Error::UnknownProvider(name)) => assert_eq!(name, provider),
                other => panic!("expected UnknownProvider for {provider:?}, got {other:?}"),
            }
        }
    }
}
