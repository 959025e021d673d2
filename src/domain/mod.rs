//! Domain Layer
//!
//! The deployment model without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - DeploymentRun, LockInfo, ResourceSet
//! - `value_objects/` - DeployEnvironment, Inventory
//! - `services/` - Lock diagnostic parsing
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never spawns processes or touches the network
//! 2. **Ports & Adapters** - Terraform, Ansible, AWS and HTTP sit behind traits

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
