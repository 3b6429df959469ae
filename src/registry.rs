//! # Registry
//!
//! The validated, queryable view over discovery. Lookups fail with
//! [`Error::NotFound`] carrying every available name, and module lookups
//! fill in the member services by re-reading the module's compose file.
//!
//! The registry holds only a [`Layout`]; every query discovers from disk
//! again, so it always reflects the current state of the tree.
//!
//! Member services are not checked against `services/`: a module may name a
//! service that does not exist, and that only fails once the service itself
//! is looked up.

use log::debug;

use crate::compose::parse_module_services;
use crate::defaults::{COMPOSE_FILENAME, WHOLE_APPLICATION};
use crate::discovery::{self, Module, ModuleMap, Service, ServiceMap};
use crate::error::{EntityKind, Error, Result};
use crate::layout::Layout;

/// A module together with the services its compose file references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDetails {
    pub module: Module,
    pub services: Vec<String>,
}

/// How a user-supplied name resolves against the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The whole-application selector.
    Application,
    /// A known module. Wins over a service with the same name.
    Module(String),
    /// A known service that is not also a module.
    Service(String),
    /// Neither a module nor a service.
    Unknown(String),
}

/// Fresh-per-call access to the services and modules of a project.
#[derive(Debug, Clone)]
pub struct Registry {
    layout: Layout,
}

impl Registry {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// All services, keyed by name.
    pub fn services(&self) -> ServiceMap {
        discovery::discover_services(&self.layout)
    }

    /// All modules, keyed by name.
    pub fn modules(&self) -> ModuleMap {
        discovery::discover_modules(&self.layout)
    }

    pub fn list_services(&self) -> Vec<String> {
        self.services().into_keys().collect()
    }

    pub fn list_modules(&self) -> Vec<String> {
        self.modules().into_keys().collect()
    }

    pub fn has_module(&self, name: &str) -> bool {
        self.modules().contains_key(name)
    }

    pub fn has_service(&self, name: &str) -> bool {
        self.services().contains_key(name)
    }

    /// Look up a service by name.
    pub fn get_service(&self, name: &str) -> Result<Service> {
        let mut services = self.services();
        services.remove(name).ok_or_else(|| Error::NotFound {
            kind: EntityKind::Service,
            name: name.to_string(),
            available: services.into_keys().collect(),
        })
    }

    /// Look up a module by name, with its member services.
    pub fn get_module(&self, name: &str) -> Result<ModuleDetails> {
        let mut modules = self.modules();
        let module = modules.remove(name).ok_or_else(|| Error::NotFound {
            kind: EntityKind::Module,
            name: name.to_string(),
            available: modules.into_keys().collect(),
        })?;

        let services = parse_module_services(&module.compose_file);
        debug!("Module {} references {:?}", name, services);

        Ok(ModuleDetails { module, services })
    }

    /// Member service names of a module.
    pub fn get_module_services(&self, name: &str) -> Result<Vec<String>> {
        Ok(self.get_module(name)?.services)
    }

    /// The whole application described as a module: the root compose file,
    /// with every discovered service as a member.
    pub fn application(&self) -> ModuleDetails {
        let compose_file = self.layout.root_compose_file();
        ModuleDetails {
            module: Module {
                name: WHOLE_APPLICATION.to_string(),
                path: self.layout.root.clone(),
                description: "Full application".to_string(),
                compose: COMPOSE_FILENAME.into(),
                has_compose: compose_file.exists(),
                compose_file,
            },
            services: self.list_services(),
        }
    }

    /// Resolve a module selector: the whole-application sentinel or a module
    /// name.
    pub fn get_module_or_application(&self, selector: &str) -> Result<ModuleDetails> {
        if selector == WHOLE_APPLICATION {
            Ok(self.application())
        } else {
            self.get_module(selector)
        }
    }

    /// Classify `name`. Modules take priority over services of the same name.
    pub fn classify(&self, name: &str) -> Target {
        if name == WHOLE_APPLICATION {
            Target::Application
        } else if self.has_module(name) {
            Target::Module(name.to_string())
        } else if self.has_service(name) {
            Target::Service(name.to_string())
        } else {
            Target::Unknown(name.to_string())
        }
    }
}
