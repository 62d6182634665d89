pub mod geometry;
pub mod instance_record;
pub mod subnet_record;
pub mod block_storage_volume_record;
pub mod load_balancer_record;
pub mod autonomous_database_record;
pub mod compartment_record;
pub mod object_storage_bucket_record;
pub mod app_state;

pub use geometry::{Dimensions, Offset};
pub use instance_record::{InstancePatch, InstanceRecord};
pub use subnet_record::SubnetRecord;
pub use block_storage_volume_record::BlockStorageVolumeRecord;
pub use load_balancer_record::LoadBalancerRecord;
pub use autonomous_database_record::AutonomousDatabaseRecord;
pub use compartment_record::CompartmentRecord;
pub use object_storage_bucket_record::ObjectStorageBucketRecord;
pub use app_state::AppState;

/// Records that carry a document-unique id.
pub trait Identified {
    fn id(&self) -> &str;
}

macro_rules! identified {
    ($($ty:ty),* $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

identified!(
    InstanceRecord,
    SubnetRecord,
    BlockStorageVolumeRecord,
    LoadBalancerRecord,
    AutonomousDatabaseRecord,
    CompartmentRecord,
    ObjectStorageBucketRecord,
);
