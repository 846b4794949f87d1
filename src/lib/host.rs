use crate::{
    disk,
    error::Result,
    net::ifconfig::{InterfaceRecord, InterfaceRecordSet},
    process::{CommandLine, Exec, Run},
};

#[derive(Debug, Clone)]
pub struct Config {
    pub ifconfig: CommandLine,
    pub df: CommandLine,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ifconfig: CommandLine {
                program: "/sbin/ifconfig".to_string(),
                args: vec!["-a".to_string()],
            },
            df: CommandLine {
                program: "df".to_string(),
                args: vec!["-P".to_string(), "-k".to_string()],
            },
        }
    }
}

/// Queries against the live host. Every call runs its command anew.
pub struct Host<R = Exec> {
    config: Config,
    runner: R,
}

impl Default for Host {
    fn default() -> Self {
        Self::new(Config::default(), Exec::default())
    }
}

impl<R: Run> Host<R> {
    pub fn new(config: Config, runner: R) -> Self {
        Self { config, runner }
    }

    #[tracing::instrument(skip_all)]
    pub fn interfaces(&self) -> Result<InterfaceRecordSet> {
        let dump = self.config.ifconfig.run_with(&self.runner)?;
        InterfaceRecordSet::parse(&dump)
    }

    pub fn interface_names(&self) -> Result<Vec<String>> {
        let interfaces = self.interfaces()?;
        Ok(interfaces.names().into_iter().map(String::from).collect())
    }

    pub fn interfaces_by_type(
        &self,
        encapsulation: Option<&str>,
    ) -> Result<Vec<InterfaceRecord>> {
        let interfaces = self.interfaces()?;
        Ok(interfaces
            .by_type(encapsulation)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn interface(&self, name: &str) -> Result<InterfaceRecord> {
        self.interfaces()?.get(name).cloned()
    }

    pub fn partition_size_kb(&self, path: &str) -> Result<u64> {
        disk::partition_size_kb(&self.runner, &self.config.df, path)
    }
}
