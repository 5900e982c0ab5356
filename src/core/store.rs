//! core::store
//!
//! Arena of graph objects keyed by identifier.
//!
//! # Architecture
//!
//! The store is a plain map from [`ObjectId`] to [`Object`] plus the set of
//! identifiers retired by [`ObjectStore::remove`]. It performs no implicit
//! cascades: operations compute the full set of objects implied by a
//! removal and call `remove` for each of them.
//!
//! # Invariants
//!
//! - An identifier is held by at most one object
//! - A removed identifier is never handed out or accepted again

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use super::ids::IdAllocator;
use super::model::{
    BuildConfiguration, BuildFile, BuildPhase, ConfigurationList, ContainerItemProxy,
    FileReference, Group, LocalPackageReference, NativeTarget, Object, ObjectKind, Project,
    RemotePackageReference, SwiftPackageProductDependency, TargetDependency,
};
use super::types::ObjectId;

/// Errors from store access.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("duplicate object identifier: {0}")]
    DuplicateIdentifier(ObjectId),

    #[error("object not found: {0}")]
    NotFound(ObjectId),

    #[error("object {id} is a {found:?}, expected {expected}")]
    KindMismatch {
        id: ObjectId,
        expected: &'static str,
        found: ObjectKind,
    },
}

macro_rules! typed_access {
    ($get:ident, $get_mut:ident, $variant:ident, $ty:ty, $expected:literal) => {
        pub fn $get(&self, id: &ObjectId) -> Result<&$ty, StoreError> {
            match self.objects.get(id) {
                Some(Object::$variant(inner)) => Ok(inner),
                Some(other) => Err(StoreError::KindMismatch {
                    id: id.clone(),
                    expected: $expected,
                    found: other.kind(),
                }),
                None => Err(StoreError::NotFound(id.clone())),
            }
        }

        pub fn $get_mut(&mut self, id: &ObjectId) -> Result<&mut $ty, StoreError> {
            match self.objects.get_mut(id) {
                Some(Object::$variant(inner)) => Ok(inner),
                Some(other) => Err(StoreError::KindMismatch {
                    id: id.clone(),
                    expected: $expected,
                    found: other.kind(),
                }),
                None => Err(StoreError::NotFound(id.clone())),
            }
        }
    };
}

macro_rules! typed_iter {
    ($name:ident, $variant:ident, $ty:ty) => {
        pub fn $name(&self) -> impl Iterator<Item = (&ObjectId, &$ty)> {
            self.objects.iter().filter_map(|(id, object)| match object {
                Object::$variant(inner) => Some((id, inner)),
                _ => None,
            })
        }
    };
}

/// The object arena.
#[derive(Debug, Clone)]
pub struct ObjectStore {
    objects: BTreeMap<ObjectId, Object>,
    retired: BTreeSet<ObjectId>,
    reserved: BTreeSet<ObjectId>,
    allocator: IdAllocator,
}

impl ObjectStore {
    /// Create an empty store whose allocator is seeded with `seed`.
    pub fn new(seed: &str) -> Self {
        Self {
            objects: BTreeMap::new(),
            retired: BTreeSet::new(),
            reserved: BTreeSet::new(),
            allocator: IdAllocator::new(seed),
        }
    }

    /// Reserve a fresh identifier.
    ///
    /// The identifier is unique among live, retired and reserved ids, and
    /// may later be passed to [`ObjectStore::add`].
    pub fn allocate(&mut self, hint: &str) -> ObjectId {
        let objects = &self.objects;
        let retired = &self.retired;
        let reserved = &self.reserved;
        let id = self.allocator.allocate(hint, |id| {
            objects.contains_key(id) || retired.contains(id) || reserved.contains(id)
        });
        self.reserved.insert(id.clone());
        id
    }

    /// Add an object under a caller-chosen identifier.
    ///
    /// # Errors
    ///
    /// `DuplicateIdentifier` if the id is live or was removed earlier.
    pub fn add(&mut self, id: ObjectId, object: Object) -> Result<(), StoreError> {
        if self.objects.contains_key(&id) || self.retired.contains(&id) {
            return Err(StoreError::DuplicateIdentifier(id));
        }
        self.reserved.remove(&id);
        self.objects.insert(id, object);
        Ok(())
    }

    /// Allocate an identifier and add the object under it.
    pub fn insert(&mut self, object: Object) -> ObjectId {
        let hint = format!("{}:{}", object.isa(), object.label());
        let id = self.allocate(&hint);
        self.reserved.remove(&id);
        self.objects.insert(id.clone(), object);
        id
    }

    /// Drop an object. Does not touch anything that refers to it.
    pub fn remove(&mut self, id: &ObjectId) -> Option<Object> {
        let removed = self.objects.remove(id);
        if removed.is_some() {
            self.retired.insert(id.clone());
        }
        removed
    }

    pub fn get(&self, id: &ObjectId) -> Option<&Object> {
        self.objects.get(id)
    }

    pub fn get_mut(&mut self, id: &ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(id)
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All objects in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&ObjectId, &Object)> {
        self.objects.iter()
    }

    typed_iter!(native_targets, NativeTarget, NativeTarget);
    typed_iter!(groups, Group, Group);
    typed_iter!(file_references, FileReference, FileReference);
    typed_iter!(build_configurations, BuildConfiguration, BuildConfiguration);
    typed_iter!(build_phases, BuildPhase, BuildPhase);
    typed_iter!(build_files, BuildFile, BuildFile);
    typed_iter!(target_dependencies, TargetDependency, TargetDependency);
    typed_iter!(container_proxies, ContainerItemProxy, ContainerItemProxy);
    typed_iter!(remote_packages, RemotePackage, RemotePackageReference);
    typed_iter!(local_packages, LocalPackage, LocalPackageReference);
    typed_iter!(package_products, PackageProduct, SwiftPackageProductDependency);

    typed_access!(project, project_mut, Project, Project, "PBXProject");
    typed_access!(group, group_mut, Group, Group, "PBXGroup");
    typed_access!(
        file_reference,
        file_reference_mut,
        FileReference,
        FileReference,
        "PBXFileReference"
    );
    typed_access!(target, target_mut, NativeTarget, NativeTarget, "PBXNativeTarget");
    typed_access!(phase, phase_mut, BuildPhase, BuildPhase, "build phase");
    typed_access!(build_file, build_file_mut, BuildFile, BuildFile, "PBXBuildFile");
    typed_access!(
        configuration,
        configuration_mut,
        BuildConfiguration,
        BuildConfiguration,
        "XCBuildConfiguration"
    );
    typed_access!(
        configuration_list,
        configuration_list_mut,
        ConfigurationList,
        ConfigurationList,
        "XCConfigurationList"
    );
    typed_access!(
        dependency,
        dependency_mut,
        TargetDependency,
        TargetDependency,
        "PBXTargetDependency"
    );
    typed_access!(
        remote_package,
        remote_package_mut,
        RemotePackage,
        RemotePackageReference,
        "XCRemoteSwiftPackageReference"
    );
    typed_access!(
        package_product,
        package_product_mut,
        PackageProduct,
        SwiftPackageProductDependency,
        "XCSwiftPackageProductDependency"
    );
}
