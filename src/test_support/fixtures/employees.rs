// Shared employee fixtures. Compiled into the crate only during tests via
// `src/lib.rs`.

use crate::core::roster::Employee;

pub struct EmployeeBuilder {
    inner: Employee,
}

impl Default for EmployeeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl EmployeeBuilder {
    pub fn new() -> Self {
        Self {
            inner: Employee {
                employee_id: "emp-fixed-0001".to_string(),
                display_name: "Fixed Employee".to_string(),
                designation: None,
                department: None,
            },
        }
    }

    pub fn employee_id(mut self, v: impl Into<String>) -> Self {
        self.inner.employee_id = v.into();
        self
    }

    pub fn display_name(mut self, v: impl Into<String>) -> Self {
        self.inner.display_name = v.into();
        self
    }

    pub fn designation(mut self, v: impl Into<String>) -> Self {
        self.inner.designation = Some(v.into());
        self
    }

    pub fn department(mut self, v: impl Into<String>) -> Self {
        self.inner.department = Some(v.into());
        self
    }

    pub fn build(self) -> Employee {
        self.inner
    }
}

/// Alice and Bob, in roster order.
pub fn sample_roster() -> Vec<Employee> {
    vec![
        EmployeeBuilder::new()
            .employee_id("emp-alice")
            .display_name("Alice Jansen")
            .designation("Engineer")
            .department("Managed Services")
            .build(),
        EmployeeBuilder::new()
            .employee_id("emp-bob")
            .display_name("Bob de Vries")
            .designation("Consultant")
            .build(),
    ]
}
