//! Module definitions: the unit that owns a set of types.
//!
//! A [`ModuleDefinition`] is used both for the stripped input module, which is filled once
//! and then only read, and for the output module, which gains types while the rewrite
//! contexts are created. Types are kept in insertion order next to two indices: by token
//! and by full name.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;

use crate::{
    metadata::{
        token::{Token, TokenTable},
        typesystem::{CilTypeList, CilTypeRc},
    },
    Error::DuplicateType,
    Result,
};

/// A reference-counted pointer to a `ModuleDefinition`
pub type ModuleDefRc = Arc<ModuleDefinition>;

/// A module and the types it defines
pub struct ModuleDefinition {
    /// Module name, e.g. `Assembly-CSharp.dll`
    pub name: String,
    /// Simple name of the defining assembly, e.g. `Assembly-CSharp`
    pub assembly_name: String,
    types: CilTypeList,
    by_token: SkipMap<Token, CilTypeRc>,
    by_fullname: DashMap<String, CilTypeRc>,
    next_rows: Mutex<HashMap<u8, u32>>,
}

impl ModuleDefinition {
    /// Create an empty module
    ///
    /// ## Arguments
    /// * 'name'          - The module name
    /// * 'assembly_name' - Simple name of the defining assembly
    pub fn new(name: &str, assembly_name: &str) -> Self {
        ModuleDefinition {
            name: name.to_string(),
            assembly_name: assembly_name.to_string(),
            types: Arc::new(boxcar::Vec::new()),
            by_token: SkipMap::new(),
            by_fullname: DashMap::new(),
            next_rows: Mutex::new(HashMap::new()),
        }
    }

    /// Register a type with this module
    ///
    /// Token allocation is bumped past the type's row, so types inserted with explicit tokens
    /// and tokens handed out by [`ModuleDefinition::allocate_token`] never collide.
    ///
    /// # Errors
    /// Returns [`crate::Error::DuplicateType`] if a type with the same token already exists.
    pub fn insert(&self, ty: CilTypeRc) -> Result<()> {
        if self.by_token.contains_key(&ty.token) {
            return Err(DuplicateType(ty.token));
        }

        self.reserve(ty.token)?;
        self.by_token.insert(ty.token, ty.clone());
        self.by_fullname.insert(ty.fullname(), ty.clone());
        self.types.push(ty);
        Ok(())
    }

    /// Hand out the next free token of `table`
    ///
    /// # Errors
    /// Returns [`crate::Error::LockError`] if the allocator lock is poisoned.
    pub fn allocate_token(&self, table: u8) -> Result<Token> {
        let mut rows = lock!(self.next_rows);
        let row = rows.entry(table).or_insert(1);
        let token = Token::from_parts(table, *row);
        *row += 1;
        Ok(token)
    }

    fn reserve(&self, token: Token) -> Result<()> {
        let mut rows = lock!(self.next_rows);
        let row = rows.entry(token.table()).or_insert(1);
        if *row <= token.row() {
            *row = token.row() + 1;
        }
        Ok(())
    }

    /// Look up a type by token
    pub fn get(&self, token: &Token) -> Option<CilTypeRc> {
        self.by_token.get(token).map(|entry| entry.value().clone())
    }

    /// Look up a type by full name (`Namespace.Name`, `Outer/Inner`)
    pub fn get_by_fullname(&self, fullname: &str) -> Option<CilTypeRc> {
        self.by_fullname
            .get(fullname)
            .map(|entry| entry.value().clone())
    }

    /// Find the first type with the given namespace and simple name
    pub fn find_by_name(&self, namespace: &str, name: &str) -> Option<CilTypeRc> {
        self.types
            .iter()
            .map(|(_, ty)| ty)
            .find(|ty| ty.namespace == namespace && ty.name == name)
            .cloned()
    }

    /// Iterate over all types in insertion order
    pub fn types(&self) -> impl Iterator<Item = &CilTypeRc> {
        self.types.iter().map(|(_, ty)| ty)
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.count()
    }

    /// Returns true if no type was registered yet
    pub fn is_empty(&self) -> bool {
        self.types.count() == 0
    }

    /// Hand out the next free `TypeDef` token
    ///
    /// # Errors
    /// Returns [`crate::Error::LockError`] if the allocator lock is poisoned.
    pub fn allocate_type_token(&self) -> Result<Token> {
        self.allocate_token(TokenTable::TYPE_DEF)
    }
}

impl std::fmt::Debug for ModuleDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleDefinition")
            .field("name", &self.name)
            .field("assembly_name", &self.assembly_name)
            .field("types", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test::create_class, Error};

    #[test]
    fn test_insert_and_lookup() {
        let module = ModuleDefinition::new("Assembly-CSharp.dll", "Assembly-CSharp");
        let player = create_class(5, "Game", "Player");
        module.insert(player.clone()).unwrap();

        assert_eq!(module.len(), 1);
        assert!(Arc::ptr_eq(&module.get(&player.token).unwrap(), &player));
        assert!(Arc::ptr_eq(
            &module.get_by_fullname("Game.Player").unwrap(),
            &player
        ));
        assert!(module.find_by_name("Game", "Player").is_some());
        assert!(module.find_by_name("", "Player").is_none());
    }

    #[test]
    fn test_duplicate_token() {
        let module = ModuleDefinition::new("Assembly-CSharp.dll", "Assembly-CSharp");
        module.insert(create_class(5, "Game", "Player")).unwrap();

        let result = module.insert(create_class(5, "Game", "Enemy"));
        assert!(matches!(result, Err(Error::DuplicateType(token)) if token.row() == 5));
        assert_eq!(module.len(), 1);
    }

    #[test]
    fn test_allocation_skips_inserted_rows() {
        let module = ModuleDefinition::new("Assembly-CSharp.dll", "Assembly-CSharp");
        module.insert(create_class(3, "Game", "Player")).unwrap();

        let token = module.allocate_type_token().unwrap();
        assert_eq!(token.table(), TokenTable::TYPE_DEF);
        assert_eq!(token.row(), 4);

        let field = module.allocate_token(TokenTable::FIELD).unwrap();
        assert_eq!(field.row(), 1);
        assert_eq!(module.allocate_token(TokenTable::FIELD).unwrap().row(), 2);
    }

    #[test]
    fn test_types_in_insertion_order() {
        let module = ModuleDefinition::new("Assembly-CSharp.dll", "Assembly-CSharp");
        module.insert(create_class(9, "Game", "B")).unwrap();
        module.insert(create_class(2, "Game", "A")).unwrap();

        let names: Vec<&str> = module.types().map(|ty| ty.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }
}
