//! Typed entity records
//!
//! Three entity kinds linked College → Program → Student. Every field is a
//! plain string; the [`Field`] enums give compile-time names to columns while
//! still allowing lookup by the column name used in files and sort requests.

use crate::validation::{is_valid_student_id, Rejection};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

/// Kind of entity stored in a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Colleges (`code,name`)
    College,
    /// Programs (`code,name,college_code`)
    Program,
    /// Students (`id,firstname,lastname,program_code,year,gender`)
    Student,
}

impl EntityKind {
    /// All kinds in dependency order (parents before children)
    pub const ALL: [EntityKind; 3] = [Self::College, Self::Program, Self::Student];

    /// Lowercase label used in messages
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::College => "college",
            Self::Program => "program",
            Self::Student => "student",
        }
    }

    /// Default file name of the persisted table
    #[inline]
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::College => "colleges.csv",
            Self::Program => "programs.csv",
            Self::Student => "students.csv",
        }
    }

    /// Column names in declared (header) order
    #[must_use]
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::College => &["code", "name"],
            Self::Program => &["code", "name", "college_code"],
            Self::Student => &["id", "firstname", "lastname", "program_code", "year", "gender"],
        }
    }

    /// Order in which sources must be imported so parents exist first
    #[inline]
    #[must_use]
    pub const fn import_order() -> [EntityKind; 3] {
        Self::ALL
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fold a key for case-insensitive comparison
#[inline]
#[must_use]
pub fn fold_key(value: &str) -> String {
    value.to_lowercase()
}

/// Case-insensitive equality of two keys
#[inline]
#[must_use]
pub fn keys_match(a: &str, b: &str) -> bool {
    a == b || fold_key(a) == fold_key(b)
}

/// Named column of an entity
pub trait Field: Copy + Eq + Hash + Debug + 'static {
    /// Every column in declared order
    const ALL: &'static [Self];

    /// Primary key column
    const PRIMARY: Self;

    /// Column name as written in headers
    fn name(self) -> &'static str;

    /// Resolve a column name (exact match)
    #[must_use]
    fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.name() == name)
    }
}

/// A typed row of one of the entity tables
pub trait Record:
    Clone + Debug + PartialEq + Serialize + for<'de> Deserialize<'de> + 'static
{
    /// Column enum for this entity
    type Field: Field;

    /// Entity kind
    const KIND: EntityKind;

    /// Columns that must be non-empty for a record to be admitted
    const REQUIRED: &'static [Self::Field];

    /// Read a column
    fn get(&self, field: Self::Field) -> &str;

    /// Overwrite a column
    fn set(&mut self, field: Self::Field, value: String);

    /// Build a record by asking for each column value
    fn from_fields(value_of: impl FnMut(Self::Field) -> String) -> Self;

    /// Value used when sorting by the synthetic `"name"` column
    fn display_name(&self) -> &str;

    /// Entity-specific format rules beyond non-empty fields
    fn check_format(&self) -> Result<(), Rejection> {
        Ok(())
    }

    /// Primary key value as stored
    #[inline]
    fn primary_key(&self) -> &str {
        self.get(Self::Field::PRIMARY)
    }

    /// Resolve a column name for this entity
    #[must_use]
    fn field_named(name: &str) -> Option<Self::Field> {
        Self::Field::parse(name)
    }
}

/// College columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollegeField {
    /// `code`
    Code,
    /// `name`
    Name,
}

impl Field for CollegeField {
    const ALL: &'static [Self] = &[Self::Code, Self::Name];
    const PRIMARY: Self = Self::Code;

    fn name(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Name => "name",
        }
    }
}

/// A college
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct College {
    /// Primary key
    pub code: String,
    /// Display name
    pub name: String,
}

impl College {
    /// Create a college
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

impl Record for College {
    type Field = CollegeField;
    const KIND: EntityKind = EntityKind::College;
    const REQUIRED: &'static [CollegeField] = &[CollegeField::Code, CollegeField::Name];

    fn get(&self, field: CollegeField) -> &str {
        match field {
            CollegeField::Code => &self.code,
            CollegeField::Name => &self.name,
        }
    }

    fn set(&mut self, field: CollegeField, value: String) {
        match field {
            CollegeField::Code => self.code = value,
            CollegeField::Name => self.name = value,
        }
    }

    fn from_fields(mut value_of: impl FnMut(CollegeField) -> String) -> Self {
        Self {
            code: value_of(CollegeField::Code),
            name: value_of(CollegeField::Name),
        }
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

/// Program columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramField {
    /// `code`
    Code,
    /// `name`
    Name,
    /// `college_code`, references [`College::code`]
    CollegeCode,
}

impl Field for ProgramField {
    const ALL: &'static [Self] = &[Self::Code, Self::Name, Self::CollegeCode];
    const PRIMARY: Self = Self::Code;

    fn name(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Name => "name",
            Self::CollegeCode => "college_code",
        }
    }
}

/// A degree program offered by a college
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Program {
    /// Primary key
    pub code: String,
    /// Display name
    pub name: String,
    /// Owning college
    pub college_code: String,
}

impl Program {
    /// Create a program
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        college_code: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            college_code: college_code.into(),
        }
    }
}

impl Record for Program {
    type Field = ProgramField;
    const KIND: EntityKind = EntityKind::Program;
    const REQUIRED: &'static [ProgramField] = &[ProgramField::Code, ProgramField::Name];

    fn get(&self, field: ProgramField) -> &str {
        match field {
            ProgramField::Code => &self.code,
            ProgramField::Name => &self.name,
            ProgramField::CollegeCode => &self.college_code,
        }
    }

    fn set(&mut self, field: ProgramField, value: String) {
        match field {
            ProgramField::Code => self.code = value,
            ProgramField::Name => self.name = value,
            ProgramField::CollegeCode => self.college_code = value,
        }
    }

    fn from_fields(mut value_of: impl FnMut(ProgramField) -> String) -> Self {
        Self {
            code: value_of(ProgramField::Code),
            name: value_of(ProgramField::Name),
            college_code: value_of(ProgramField::CollegeCode),
        }
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

/// Student columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StudentField {
    /// `id`, formatted `YYYY-NNNN`
    Id,
    /// `firstname`
    FirstName,
    /// `lastname`
    LastName,
    /// `program_code`, references [`Program::code`]
    ProgramCode,
    /// `year`
    Year,
    /// `gender`
    Gender,
}

impl Field for StudentField {
    const ALL: &'static [Self] = &[
        Self::Id,
        Self::FirstName,
        Self::LastName,
        Self::ProgramCode,
        Self::Year,
        Self::Gender,
    ];
    const PRIMARY: Self = Self::Id;

    fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FirstName => "firstname",
            Self::LastName => "lastname",
            Self::ProgramCode => "program_code",
            Self::Year => "year",
            Self::Gender => "gender",
        }
    }
}

/// An enrolled student
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Student {
    /// Primary key, `YYYY-NNNN`
    pub id: String,
    /// Given name
    pub firstname: String,
    /// Family name
    pub lastname: String,
    /// Enrolled program
    pub program_code: String,
    /// Year level (free-form, numeric-sortable)
    pub year: String,
    /// Gender (free-form)
    pub gender: String,
}

impl Student {
    /// Create a student with the identifying fields; year and gender start empty
    pub fn new(
        id: impl Into<String>,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        program_code: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            firstname: firstname.into(),
            lastname: lastname.into(),
            program_code: program_code.into(),
            year: String::new(),
            gender: String::new(),
        }
    }

    /// With year level
    #[inline]
    #[must_use]
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    /// With gender
    #[inline]
    #[must_use]
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }
}

impl Record for Student {
    type Field = StudentField;
    const KIND: EntityKind = EntityKind::Student;
    const REQUIRED: &'static [StudentField] = &[
        StudentField::Id,
        StudentField::FirstName,
        StudentField::LastName,
    ];

    fn get(&self, field: StudentField) -> &str {
        match field {
            StudentField::Id => &self.id,
            StudentField::FirstName => &self.firstname,
            StudentField::LastName => &self.lastname,
            StudentField::ProgramCode => &self.program_code,
            StudentField::Year => &self.year,
            StudentField::Gender => &self.gender,
        }
    }

    fn set(&mut self, field: StudentField, value: String) {
        match field {
            StudentField::Id => self.id = value,
            StudentField::FirstName => self.firstname = value,
            StudentField::LastName => self.lastname = value,
            StudentField::ProgramCode => self.program_code = value,
            StudentField::Year => self.year = value,
            StudentField::Gender => self.gender = value,
        }
    }

    fn from_fields(mut value_of: impl FnMut(StudentField) -> String) -> Self {
        Self {
            id: value_of(StudentField::Id),
            firstname: value_of(StudentField::FirstName),
            lastname: value_of(StudentField::LastName),
            program_code: value_of(StudentField::ProgramCode),
            year: value_of(StudentField::Year),
            gender: value_of(StudentField::Gender),
        }
    }

    fn display_name(&self) -> &str {
        &self.lastname
    }

    fn check_format(&self) -> Result<(), Rejection> {
        if is_valid_student_id(&self.id) {
            Ok(())
        } else {
            Err(Rejection::InvalidStudentId {
                id: self.id.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_order_matches_columns() {
        let college: Vec<_> = CollegeField::ALL.iter().map(|f| f.name()).collect();
        let program: Vec<_> = ProgramField::ALL.iter().map(|f| f.name()).collect();
        let student: Vec<_> = StudentField::ALL.iter().map(|f| f.name()).collect();

        assert_eq!(college, EntityKind::College.columns());
        assert_eq!(program, EntityKind::Program.columns());
        assert_eq!(student, EntityKind::Student.columns());
    }

    #[test]
    fn parse_is_exact() {
        assert_eq!(StudentField::parse("program_code"), Some(StudentField::ProgramCode));
        assert_eq!(StudentField::parse("Program_Code"), None);
        assert_eq!(CollegeField::parse("college_code"), None);
    }

    #[test]
    fn set_then_get() {
        let mut program = Program::new("BSCS", "Computer Science", "CCS");
        program.set(ProgramField::CollegeCode, "CCIS".to_string());
        assert_eq!(program.get(ProgramField::CollegeCode), "CCIS");
        assert_eq!(program.primary_key(), "BSCS");
    }

    #[test]
    fn from_fields_fills_every_column() {
        let student = Student::from_fields(|field| field.name().to_uppercase());
        assert_eq!(student.id, "ID");
        assert_eq!(student.gender, "GENDER");
    }

    #[test]
    fn display_name_per_kind() {
        let student = Student::new("2023-0001", "Juan", "Cruz", "BSCS");
        assert_eq!(student.display_name(), "Cruz");
        assert_eq!(College::new("CCS", "Computing").display_name(), "Computing");
    }

    #[test]
    fn keys_match_ignores_case() {
        assert!(keys_match("ccs", "CCS"));
        assert!(!keys_match("CCS", "CCIS"));
        assert_eq!(fold_key("BsCs"), "bscs");
    }

    #[test]
    fn student_format_check() {
        let valid = Student::new("2023-0001", "Juan", "Cruz", "BSCS");
        assert!(valid.check_format().is_ok());

        let invalid = Student::new("23-1", "Juan", "Cruz", "BSCS");
        assert!(matches!(
            invalid.check_format(),
            Err(Rejection::InvalidStudentId { .. })
        ));
    }
}
