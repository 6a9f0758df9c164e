//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{Expense, ExpenseId, GroupId};

use super::file_io::DataFile;

/// Serializable expense data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    file: DataFile,
    data: RwLock<HashMap<ExpenseId, Expense>>,
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: DataFile::new(path),
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk
    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: ExpenseData = self.file.load()?;

        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for expense in file_data.expenses {
            data.insert(expense.id.clone(), expense);
        }

        Ok(())
    }

    /// Save expenses to disk
    pub fn save(&self) -> Result<(), LedgerError> {
        let expenses = self.get_all()?;
        self.file.store(&ExpenseData { expenses })
    }

    /// Get an expense by ID
    pub fn get(&self, id: &ExpenseId) -> Result<Option<Expense>, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(id).cloned())
    }

    /// Get all expenses, oldest first
    pub fn get_all(&self) -> Result<Vec<Expense>, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        expenses.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(expenses)
    }

    /// Get the expenses of one group, oldest first
    pub fn get_by_group(&self, group_id: &GroupId) -> Result<Vec<Expense>, LedgerError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|e| &e.group_id == group_id)
            .collect())
    }

    /// Find expenses whose id matches a full id or a short prefix
    pub fn find(&self, reference: &str) -> Result<Vec<Expense>, LedgerError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|e| e.id.as_str() == reference || e.id.matches(reference))
            .collect())
    }

    /// Insert or update an expense
    pub fn upsert(&self, expense: Expense) -> Result<(), LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(expense.id.clone(), expense);
        Ok(())
    }

    /// Delete an expense
    pub fn delete(&self, id: &ExpenseId) -> Result<bool, LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(id).is_some())
    }

    /// Delete every expense of a group, returning how many were removed
    pub fn delete_by_group(&self, group_id: &GroupId) -> Result<usize, LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let before = data.len();
        data.retain(|_, e| &e.group_id != group_id);
        Ok(before - data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MemberId, Money};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        let repo = ExpenseRepository::new(path);
        (temp_dir, repo)
    }

    fn expense(group: &GroupId, description: &str) -> Expense {
        Expense::equal(
            group.clone(),
            description,
            Money::from_cents(1_000),
            "a",
            vec![MemberId::from("a"), MemberId::from("b")],
        )
    }

    #[test]
    fn test_upsert_save_reload() {
        let (_temp_dir, repo) = create_test_repo();
        let e = expense(&GroupId::from("g"), "Dinner");
        repo.upsert(e.clone()).unwrap();
        repo.save().unwrap();

        repo.load().unwrap();
        assert_eq!(repo.get(&e.id).unwrap(), Some(e));
    }

    #[test]
    fn test_group_filter_and_delete_by_group() {
        let (_temp_dir, repo) = create_test_repo();
        let g1 = GroupId::from("g1");
        let g2 = GroupId::from("g2");
        repo.upsert(expense(&g1, "One")).unwrap();
        repo.upsert(expense(&g1, "Two")).unwrap();
        repo.upsert(expense(&g2, "Three")).unwrap();

        assert_eq!(repo.get_by_group(&g1).unwrap().len(), 2);
        assert_eq!(repo.delete_by_group(&g1).unwrap(), 2);
        assert!(repo.get_by_group(&g1).unwrap().is_empty());
        assert_eq!(repo.get_all().unwrap().len(), 1);
    }

    #[test]
    fn test_find_by_prefix() {
        let (_temp_dir, repo) = create_test_repo();
        let e = expense(&GroupId::from("g"), "Taxi");
        repo.upsert(e.clone()).unwrap();

        let prefix = &e.id.as_str()[..8];
        assert_eq!(repo.find(prefix).unwrap(), vec![e.clone()]);
        assert_eq!(repo.find(&e.id.short()).unwrap(), vec![e]);
    }
}
