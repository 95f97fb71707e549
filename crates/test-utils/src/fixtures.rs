//! Common CSV fixtures for csv-plot tests.
//!
//! Each fixture is a complete CSV document with a header row.

/// Two numeric columns, suitable for every plot type.
pub const TWO_NUMERIC: &str = "x,y\n1,2.5\n2,3.1\n3,4.8\n4,4.2\n5,6.0\n6,7.3\n7,6.9\n8,8.4\n";

/// Duplicate categories with numeric values (bar mean A=2.0, B=2.0).
pub const DUPLICATE_GROUPS: &str = "x,y\nA,1\nA,3\nB,2\n";

/// Category column with several observations per group.
pub const GROUPED_SAMPLES: &str = "species,length\n\
setosa,5.1\nsetosa,4.9\nsetosa,4.7\nsetosa,5.0\nsetosa,5.4\n\
versicolor,7.0\nversicolor,6.4\nversicolor,6.9\nversicolor,5.5\nversicolor,6.5\n\
virginica,6.3\nvirginica,5.8\nvirginica,7.1\nvirginica,6.3\nvirginica,6.5\n";

/// Mixed table: text label plus three numeric columns, one with a gap.
pub const MIXED_TABLE: &str = "city,temp,humidity,wind\n\
Oslo,3.5,81,5.2\nLima,19.0,84,3.1\nRome,21.2,,2.4\nCairo,28.4,22,4.0\nQuito,14.1,72,1.9\n";

/// Numeric series with missing cells.
pub const WITH_GAPS: &str = "x,y\n1,1\n2,\n3,3\n,4\n5,5\n";

/// Pie slices with duplicate labels.
pub const PIE_SLICES: &str = "fruit,count\napple,3\nbanana,2\napple,1\ncherry,4\n";

/// Rows longer than the header.
pub const MALFORMED: &str = "x,y\n1,2,3\n";
