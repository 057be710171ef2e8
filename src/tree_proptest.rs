//! Property-based tests for the tree invariants.
//!
//! These tests use proptest to generate random names, shapes and contents
//! and verify that the folder and manager rules hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::entity::{Entity, FileId, FolderId};
    use crate::file::File;
    use crate::manager::FileSystemManager;
    use proptest::prelude::*;
    use proptest::sample::Index;
    use std::time::{Duration, SystemTime};

    fn name_strategy() -> impl Strategy<Value = String> {
        "[a-zA-Z][a-zA-Z0-9_]{0,11}"
    }

    fn extension_strategy() -> impl Strategy<Value = String> {
        "[a-z]{1,4}"
    }

    /// Folders nested `len` deep under root, outermost first
    fn chain(manager: &mut FileSystemManager, len: usize) -> Vec<FolderId> {
        let mut parent = manager.root();
        let mut chain = Vec::with_capacity(len);
        for depth in 0..len {
            let id = manager
                .fs_mut()
                .new_folder(&format!("level{}", depth), Some(parent))
                .unwrap();
            chain.push(id);
            parent = id;
        }
        chain
    }

    fn attached_file(manager: &mut FileSystemManager, name: &str, ext: &str, folder: FolderId) -> FileId {
        let file = File::with_content(name, ext, b"data".to_vec()).unwrap();
        manager.fs_mut().insert_file(file, Some(folder)).unwrap()
    }

    // ============================================================================
    // Folder reparent cycle rejection
    // ============================================================================

    proptest! {
        /// Property: a folder can never be reparented under itself or a descendant,
        /// and the rejected attempt changes no parent link
        #[test]
        fn reparent_into_own_subtree_is_rejected(len in 1usize..8, a in any::<Index>(), b in any::<Index>()) {
            let mut manager = FileSystemManager::new();
            let chain = chain(&mut manager, len);
            let (lo, hi) = {
                let (x, y) = (a.index(len), b.index(len));
                (x.min(y), x.max(y))
            };
            let before: Vec<Option<FolderId>> = chain
                .iter()
                .map(|&id| manager.fs().folder(id).unwrap().parent())
                .collect();

            let result = manager.fs_mut().reparent_folder(chain[lo], Some(chain[hi]));
            prop_assert!(result.unwrap_err().is_invalid_argument());

            let after: Vec<Option<FolderId>> = chain
                .iter()
                .map(|&id| manager.fs().folder(id).unwrap().parent())
                .collect();
            prop_assert_eq!(before, after);
        }

        /// Property: reparenting a folder under a sibling branch is allowed
        #[test]
        fn reparent_across_branches_is_allowed(left in name_strategy(), right in name_strategy()) {
            prop_assume!(!left.eq_ignore_ascii_case(&right));
            let mut manager = FileSystemManager::new();
            let root = manager.root();
            let left = manager.fs_mut().new_folder(&left, Some(root)).unwrap();
            let right = manager.fs_mut().new_folder(&right, Some(root)).unwrap();

            prop_assert!(manager.fs_mut().reparent_folder(left, Some(right)).is_ok());
            prop_assert_eq!(manager.fs().folder(left).unwrap().parent(), Some(right));
        }
    }

    // ============================================================================
    // Case-insensitive sibling collisions
    // ============================================================================

    proptest! {
        /// Property: folder names differing only by case collide
        #[test]
        fn folder_names_collide_ignoring_case(name in name_strategy()) {
            let mut manager = FileSystemManager::new();
            let root = manager.root();
            manager.fs_mut().new_folder(&name, Some(root)).unwrap();

            let upper = manager.fs_mut().new_folder(&name.to_uppercase(), Some(root));
            prop_assert!(upper.is_err());
            let lower = manager.fs_mut().new_folder(&name.to_lowercase(), Some(root));
            prop_assert!(lower.is_err());
            prop_assert_eq!(manager.fs().folder(root).unwrap().folders().len(), 1);
        }

        /// Property: file name and extension both compare ignoring case
        #[test]
        fn file_names_collide_ignoring_case(name in name_strategy(), ext in extension_strategy()) {
            let mut manager = FileSystemManager::new();
            let root = manager.root();
            attached_file(&mut manager, &name, &ext, root);

            let twin = File::with_content(name.to_uppercase(), ext.to_uppercase(), Vec::new()).unwrap();
            let twin = manager.fs_mut().insert_file(twin, None).unwrap();
            manager.fs_mut().reparent_file(twin, Some(root)).unwrap();

            prop_assert!(manager.create_file(twin).unwrap_err().is_invalid_argument());
            prop_assert_eq!(manager.fs().folder(root).unwrap().files().len(), 1);
        }

        /// Property: the same name with another extension does not collide
        #[test]
        fn file_with_other_extension_does_not_collide(name in name_strategy(), ext in extension_strategy()) {
            let mut manager = FileSystemManager::new();
            let root = manager.root();
            attached_file(&mut manager, &name, &ext, root);

            let other = File::with_content(name.clone(), format!("{}x", ext), Vec::new()).unwrap();
            let other = manager.fs_mut().insert_file(other, None).unwrap();
            prop_assert!(manager.create_file(other).is_ok());
            prop_assert_eq!(manager.fs().folder(root).unwrap().files().len(), 2);
        }
    }

    // ============================================================================
    // Manager create / move
    // ============================================================================

    proptest! {
        /// Property: create stores a distinct copy; later changes to the
        /// original do not reach the tree
        #[test]
        fn create_never_attaches_original(name in name_strategy(), ext in extension_strategy(), renamed in name_strategy()) {
            prop_assume!(name != renamed);
            let mut manager = FileSystemManager::new();
            let root = manager.root();
            let original = File::with_content(name.clone(), ext, b"abc".to_vec()).unwrap();
            let original = manager.fs_mut().insert_file(original, None).unwrap();

            let stored = manager.create_file(original).unwrap();
            prop_assert_ne!(stored, original);
            prop_assert!(!manager.fs().folder(root).unwrap().files().contains(&original));

            manager.fs_mut().rename_file(original, &renamed).unwrap();
            prop_assert_eq!(manager.fs().file(stored).unwrap().name(), name.as_str());
        }

        /// Property: moving into a folder outside the root hierarchy fails and
        /// leaves the file where it was
        #[test]
        fn move_to_unreachable_folder_leaves_source(name in name_strategy(), ext in extension_strategy(), outside in name_strategy()) {
            let mut manager = FileSystemManager::new();
            let chain = chain(&mut manager, 2);
            let file = attached_file(&mut manager, &name, &ext, chain[1]);
            let detached = manager.fs_mut().new_folder(&outside, None).unwrap();

            let result = manager.move_file(file, detached);
            prop_assert!(result.unwrap_err().is_invalid_argument());
            prop_assert_eq!(manager.fs().file(file).unwrap().parent(), Some(chain[1]));
            prop_assert!(manager.fs().contains_file(chain[1], file));
            prop_assert!(manager.fs().folder(detached).unwrap().is_empty());
        }

        /// Property: a valid move leaves an equal file in the destination and
        /// none in the source
        #[test]
        fn move_to_reachable_folder_relocates(name in name_strategy(), ext in extension_strategy()) {
            let mut manager = FileSystemManager::new();
            let root = manager.root();
            let chain = chain(&mut manager, 2);
            let file = attached_file(&mut manager, &name, &ext, chain[1]);

            let moved = manager.move_file(file, root).unwrap();
            prop_assert!(manager.fs().contains_file(root, file));
            prop_assert!(!manager.fs().contains_file(chain[1], file));
            prop_assert_eq!(manager.fs().file(moved).unwrap(), manager.fs().file(file).unwrap());
        }

        /// Property: copying or moving a folder into its own subtree is an
        /// illegal hierarchy operation, for root as for any other folder
        #[test]
        fn folder_into_own_subtree_is_illegal(len in 1usize..6, a in any::<Index>(), b in any::<Index>(), copy in any::<bool>()) {
            let mut manager = FileSystemManager::new();
            let mut folders = vec![manager.root()];
            folders.extend(chain(&mut manager, len));
            let (x, y) = (a.index(folders.len()), b.index(folders.len()));
            let (source, destination) = (folders[x.min(y)], folders[x.max(y)]);
            let before = manager.stats();

            let err = if copy {
                manager.copy_folder(source, destination).unwrap_err()
            } else {
                manager.move_folder(source, destination).unwrap_err()
            };
            prop_assert!(err.is_illegal_hierarchy());
            prop_assert_eq!(manager.stats(), before);
            prop_assert_eq!(manager.fs().folder(manager.root()).unwrap().parent(), None);
        }
    }

    // ============================================================================
    // File duplication
    // ============================================================================

    proptest! {
        /// Property: a duplicate equals its source
        #[test]
        fn duplicate_equals_source(
            name in name_strategy(),
            ext in "[a-z]{0,4}",
            content in prop::collection::vec(any::<u8>(), 0..64),
            size in any::<u64>(),
            secs in 0u64..4_000_000_000
        ) {
            let created = SystemTime::UNIX_EPOCH + Duration::from_secs(secs);
            let file = File::new(name, size, created, content.clone(), ext).unwrap();
            let copy = file.duplicate();

            prop_assert_eq!(&copy, &file);
            prop_assert_eq!(copy.created(), file.created());
            prop_assert_eq!(copy.size(), size);
            prop_assert_eq!(copy.content(), &content[..]);
        }
    }
}
