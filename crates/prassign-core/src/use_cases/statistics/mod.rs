pub(crate) mod get_statistics;

pub use get_statistics::GetStatisticsInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::get_statistics::MockGetStatisticsInterface;
