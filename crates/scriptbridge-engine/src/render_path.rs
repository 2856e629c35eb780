//! Render path: ordered commands and named render targets.
//!
//! Reference counted like every engine class, but not an [`Object`](crate::Object);
//! it has no runtime type of its own.

use std::cell::RefCell;

use scriptbridge_core::{SharedPtr, bridged};

/// One step of a render path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPathCommand {
    pub tag: String,
    pub enabled: bool,
}

impl RenderPathCommand {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            enabled: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct RenderPath {
    commands: RefCell<Vec<RenderPathCommand>>,
    render_targets: RefCell<Vec<String>>,
}

bridged!(RenderPath, "RenderPath");

impl RenderPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// A deep copy.
    pub fn clone_path(&self) -> SharedPtr<RenderPath> {
        SharedPtr::new(RenderPath {
            commands: RefCell::new(self.commands.borrow().clone()),
            render_targets: RefCell::new(self.render_targets.borrow().clone()),
        })
    }

    /// Append the commands and render targets of another path.
    pub fn append(&self, other: &RenderPath) {
        if std::ptr::eq(self, other) {
            let commands = self.commands.borrow().clone();
            self.commands.borrow_mut().extend(commands);
            let targets = self.render_targets.borrow().clone();
            self.render_targets.borrow_mut().extend(targets);
            return;
        }
        self.commands
            .borrow_mut()
            .extend(other.commands.borrow().iter().cloned());
        self.render_targets
            .borrow_mut()
            .extend(other.render_targets.borrow().iter().cloned());
    }

    pub fn add_command(&self, command: RenderPathCommand) {
        self.commands.borrow_mut().push(command);
    }

    pub fn num_commands(&self) -> u32 {
        self.commands.borrow().len() as u32
    }

    /// Enable or disable every command with the tag.
    pub fn set_enabled(&self, tag: &str, active: bool) {
        for command in self.commands.borrow_mut().iter_mut() {
            if command.tag.eq_ignore_ascii_case(tag) {
                command.enabled = active;
            }
        }
    }

    pub fn toggle_enabled(&self, tag: &str) {
        for command in self.commands.borrow_mut().iter_mut() {
            if command.tag.eq_ignore_ascii_case(tag) {
                command.enabled = !command.enabled;
            }
        }
    }

    /// True if any command with the tag is enabled.
    pub fn is_enabled(&self, tag: &str) -> bool {
        self.commands
            .borrow()
            .iter()
            .any(|c| c.enabled && c.tag.eq_ignore_ascii_case(tag))
    }

    pub fn add_render_target(&self, name: &str) {
        self.render_targets.borrow_mut().push(name.to_string());
    }

    pub fn remove_render_target(&self, index: u32) {
        let mut targets = self.render_targets.borrow_mut();
        if (index as usize) < targets.len() {
            targets.remove(index as usize);
        }
    }

    pub fn remove_render_target_by_name(&self, name: &str) {
        self.render_targets
            .borrow_mut()
            .retain(|t| !t.eq_ignore_ascii_case(name));
    }

    pub fn num_render_targets(&self) -> u32 {
        self.render_targets.borrow().len() as u32
    }
}
